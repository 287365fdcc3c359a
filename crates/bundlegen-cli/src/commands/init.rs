//! Implementation of the `bundlegen init` command.
//!
//! Responsibility: translate CLI arguments into domain values, call the core
//! bundle service, and display results. No business logic lives here.

use tracing::{debug, info, instrument};

use bundlegen_adapters::{
    BuiltinSkeleton, DirSkeletonStore, LocalFilesystem, PlaceholderRenderer, YamlConfigStore,
};
use bundlegen_core::{
    application::{BundleService, ScaffoldPlan, ScaffoldReport, ports::SkeletonStore},
    domain::{BundleName, DomainError, Namespace},
};

use crate::{
    cli::{InitArgs, PlanFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `bundlegen init` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the namespace / bundle name
/// 2. Resolve application paths (config file + `--app-dir`)
/// 3. Early-exit if `--dry-run`: print the plan, write nothing
/// 4. Execute scaffolding via `BundleService`
/// 5. Print the success guide
#[instrument(skip_all, fields(namespace = %args.namespace))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Validate identity (fail fast, before any file is touched)
    let (namespace, bundle) = resolve_identity(&args)?;

    // 2. Resolve application paths
    let paths = config.app_paths().rooted_at(&args.app_dir);

    debug!(
        namespace = %namespace,
        bundle = %bundle,
        app_dir = %args.app_dir.display(),
        "Target resolved"
    );

    // 3. Dry run: describe but do not write.
    if args.dry_run {
        let plan = ScaffoldPlan::build(&namespace, &bundle, &paths);
        return print_plan(&plan, args.plan_format, &output);
    }

    // 4. Create adapters and scaffold
    let skeleton: Box<dyn SkeletonStore> = match &args.skeleton {
        Some(dir) => Box::new(DirSkeletonStore::new(dir)),
        None => Box::new(BuiltinSkeleton::new()),
    };
    let service = BundleService::new(
        skeleton,
        Box::new(PlaceholderRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(YamlConfigStore::new()),
    );

    output.header(&format!("Creating bundle '{bundle}'..."))?;
    info!(bundle = %bundle, "Scaffold started");

    let report = service
        .generate(&namespace, &bundle, &paths)
        .map_err(CliError::Core)?;

    info!(bundle = %bundle, "Scaffold completed");

    // 5. Success + next steps
    print_summary(&bundle, &report, &global, &output)
}

// ── Identity resolution ───────────────────────────────────────────────────────

/// Build validated domain values from the raw arguments.
pub fn resolve_identity(args: &InitArgs) -> CliResult<(Namespace, BundleName)> {
    let namespace: Namespace = args
        .namespace
        .parse()
        .map_err(|e: DomainError| CliError::Core(e.into()))?;

    let bundle = match &args.bundle_name {
        Some(name) => BundleName::new(name).map_err(|e| CliError::Core(e.into()))?,
        None => BundleName::derived_from(&namespace),
    };

    Ok((namespace, bundle))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn print_plan(plan: &ScaffoldPlan, format: PlanFormat, out: &OutputManager) -> CliResult<()> {
    match format {
        PlanFormat::Json => {
            out.print(&serde_json::to_string_pretty(plan)?)?;
        }
        PlanFormat::Human => {
            out.header(&format!(
                "Dry run: {} operations for {}",
                plan.steps.len(),
                plan.bundle_dir.display()
            ))?;
            for step in &plan.steps {
                out.print(&format!("  {step}"))?;
            }
            out.print("")?;
            out.info("No files were written")?;
        }
    }
    Ok(())
}

fn print_summary(
    bundle: &BundleName,
    report: &ScaffoldReport,
    global: &GlobalArgs,
    out: &OutputManager,
) -> CliResult<()> {
    out.success(&format!(
        "Bundle '{bundle}' created at {}",
        report.bundle_dir.display()
    ))?;

    if global.quiet {
        return Ok(());
    }

    out.print("")?;
    out.print("Registered in:")?;
    for file in &report.files_patched {
        out.print(&format!("  {}", file.display()))?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!(
        "  Define your entities in {}",
        report.bundle_dir.join("Resources/config/doctrine/mapping.orm.yml").display()
    ))?;
    out.print(&format!(
        "  Open /{} in your browser to see the default controller",
        bundle.lowercase()
    ))?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
