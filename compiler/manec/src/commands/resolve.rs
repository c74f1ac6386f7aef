//! The `resolve` command: flatten the interfaces of each target and print
//! them.

use std::path::{Path, PathBuf};

use mane_ir::Interface;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{default_roots, Config, OutputFormat, PATH_ENV};
use crate::loader::{PackageLoader, PackageSource};
use crate::report::{render_error, render_json, render_text, TargetReport};
use crate::resolve::{ResolveError, Resolver};

/// Parsed `mane resolve` arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    pub config: Config,
    pub targets: Vec<String>,
}

/// Parse the arguments after `resolve`.
///
/// `--root=` directories come first in the search order, followed by
/// `MANE_PATH` and the current directory.
pub fn parse_resolve_args(args: &[String]) -> Result<ResolveOptions, String> {
    let mut config = Config::default();
    let mut targets = Vec::new();
    for arg in args {
        if arg.starts_with('-') {
            if !config.apply_flag(arg) {
                return Err(format!("unknown option '{arg}'"));
            }
        } else {
            targets.push(arg.clone());
        }
    }
    if targets.is_empty() {
        return Err("missing target".to_owned());
    }
    config.roots.extend(default_roots(
        std::env::var_os(PATH_ENV),
        std::env::current_dir().ok(),
    ));
    Ok(ResolveOptions { config, targets })
}

/// What a command-line argument names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Package(String),
}

impl Target {
    pub fn parse(arg: &str) -> Self {
        let is_go_file = Path::new(arg)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("go"));
        if is_go_file {
            Target::File(PathBuf::from(arg))
        } else {
            Target::Package(arg.to_owned())
        }
    }

    fn resolve<S: PackageSource>(
        &self,
        resolver: &Resolver<'_, S>,
    ) -> Result<Vec<Interface>, ResolveError> {
        match self {
            Target::File(path) => resolver.resolve_file(path),
            Target::Package(import_path) => resolver.resolve_package(import_path),
        }
    }
}

/// Result of one target, labelled with the argument that named it.
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: String,
    pub result: Result<Vec<Interface>, ResolveError>,
}

/// Resolve every target against one shared loader. Outcomes come back in
/// argument order whether or not they ran in parallel.
pub fn resolve_targets<S: PackageSource>(
    loader: &PackageLoader<S>,
    config: &Config,
    targets: &[String],
) -> Vec<TargetOutcome> {
    let run = |arg: &String| {
        let resolver = Resolver::new(loader).with_foreign_keys(config.foreign_keys);
        let result = Target::parse(arg).resolve(&resolver);
        if config.verbose {
            match &result {
                Ok(interfaces) => eprintln!("resolved {arg}: {} interfaces", interfaces.len()),
                Err(_) => eprintln!("failed {arg}"),
            }
        }
        TargetOutcome {
            target: arg.clone(),
            result,
        }
    };

    if !config.parallel || targets.len() < 2 {
        return targets.iter().map(run).collect();
    }

    debug!(targets = targets.len(), "resolving in parallel");
    rayon::ThreadPoolBuilder::new()
        .stack_size(16 * 1024 * 1024)
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| targets.par_iter().map(run).collect::<Vec<_>>())
        })
        .unwrap_or_else(|e| {
            warn!("failed to create thread pool ({e}), resolving sequentially");
            targets.iter().map(run).collect()
        })
}

/// Render outcomes for stdout. Text output includes failures inline; JSON
/// output carries them in each target's `error` field.
pub fn render_outcomes(outcomes: &[TargetOutcome], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut blocks = Vec::new();
            for outcome in outcomes {
                let mut block = format!("// {}\n", outcome.target);
                match &outcome.result {
                    Ok(interfaces) if interfaces.is_empty() => {
                        block.push_str("// no interfaces\n");
                    }
                    Ok(interfaces) => {
                        for iface in interfaces {
                            block.push_str(&render_text(iface));
                            block.push('\n');
                        }
                    }
                    Err(error) => {
                        block.push_str(&render_error(error));
                        block.push('\n');
                    }
                }
                blocks.push(block);
            }
            blocks.join("\n")
        }
        OutputFormat::Json => {
            let reports: Vec<TargetReport> = outcomes
                .iter()
                .map(|outcome| TargetReport::new(&outcome.target, &outcome.result))
                .collect();
            match render_json(&reports) {
                Ok(json) => json + "\n",
                Err(error) => format!("error: cannot serialize report: {error}\n"),
            }
        }
    }
}

/// Run `mane resolve`. Returns `false` if any target failed.
pub fn run_resolve(options: &ResolveOptions) -> bool {
    let loader = PackageLoader::new(options.config.source());
    let outcomes = resolve_targets(&loader, &options.config, &options.targets);
    print!("{}", render_outcomes(&outcomes, options.config.output));

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if options.config.verbose {
        eprintln!(
            "{} targets, {failed} failed, {} packages loaded",
            outcomes.len(),
            loader.cached()
        );
    }
    failed == 0
}

#[cfg(test)]
mod tests;
