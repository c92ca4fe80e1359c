//! dna installer CLI entrypoint.
//!
//! Provisions the local dna::}{::lang installation: directory scaffold,
//! artifact fetch, executable install, first-run mesh config, and PATH
//! wiring. Exit code 0 on full success, 1 otherwise.

use camino::Utf8PathBuf;
use clap::Parser;
use dna_installer::artifact::ArtefactSources;
use dna_installer::cli::Cli;
use dna_installer::dirs::SystemBaseDirs;
use dna_installer::error::{InstallerError, Result};
use dna_installer::fetch::HttpFetcher;
use dna_installer::layout::{DEFAULT_PREFIX, InstallLayout, SystemLayout};
use dna_installer::outcome::StepOutcome;
use dna_installer::output::{DryRunInfo, reload_hint, success_message, write_stderr_line};
use dna_installer::ownership::{is_elevated, sudo_owner_from_env};
use dna_installer::pipeline::{self, InstallPlan, InstallReport, InstallVariant};
use dna_installer::profile::UserProfile;
use dna_installer::settings::{ARTEFACT_FILE, EnvSnapshot, InstallSettings};
use dna_installer::wrapper::path_instructions;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let env = EnvSnapshot::capture();
    let settings = InstallSettings::resolve(&cli.overrides(), &env);

    let dirs = SystemBaseDirs;
    let shell_var = std::env::var("SHELL").ok();
    let profile = UserProfile::resolve(&dirs, shell_var.as_deref())?;

    let plan = build_plan(cli, settings, &profile);

    if cli.dry_run {
        print_dry_run(cli, &plan, stderr);
        return Ok(());
    }

    if cli.global && !is_elevated() {
        return Err(InstallerError::ElevationRequired);
    }

    let report = pipeline::run(&plan, &HttpFetcher, stderr)?;
    report_outcome(&plan, &report, stderr);
    Ok(())
}

/// Assemble the install plan from resolved settings and the user profile.
fn build_plan(cli: &Cli, settings: InstallSettings, profile: &UserProfile) -> InstallPlan {
    let layout = match settings.dna_home() {
        Some(root) => InstallLayout::at(root.clone()),
        None => InstallLayout::under_home(profile.home()),
    };

    let sources = ArtefactSources {
        local_candidates: cwd_candidates(),
        urls: settings.artifact_urls(),
    };

    let (variant, rc_path) = if cli.global {
        let prefix = cli
            .prefix
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_PREFIX));
        let variant = InstallVariant::Global {
            system: SystemLayout::at(prefix),
            owner: sudo_owner_from_env(),
        };
        // <prefix>/bin is conventionally on PATH already, and editing a shell
        // resource file as root would touch a root-owned home.
        (variant, None)
    } else {
        let rc_path = (!cli.skip_profile).then(|| profile.rc_path());
        (InstallVariant::User, rc_path)
    };

    InstallPlan {
        settings,
        layout,
        shell: profile.shell(),
        rc_path,
        sources,
        variant,
        quiet: cli.quiet,
    }
}

/// Local artifact candidates: a copy sitting in the current directory wins
/// over any network fetch.
fn cwd_candidates() -> Vec<Utf8PathBuf> {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| Utf8PathBuf::from_path_buf(cwd).ok())
        .map(|cwd| vec![cwd.join(ARTEFACT_FILE)])
        .unwrap_or_default()
}

fn print_dry_run(cli: &Cli, plan: &InstallPlan, stderr: &mut dyn Write) {
    let artifact_path = plan.artifact_dest();
    let prefix = match &plan.variant {
        InstallVariant::Global { system, .. } => Some(system.prefix()),
        InstallVariant::User => None,
    };
    let info = DryRunInfo {
        global: cli.global,
        user_root: plan.layout.root(),
        prefix,
        registry: plan.settings.registry(),
        local_registry: plan.settings.local_registry(),
        artifact_path: &artifact_path,
        rc_path: plan.rc_path.as_deref(),
        verbosity: cli.verbosity,
    };
    write_stderr_line(stderr, info.display_text());
}

fn report_outcome(plan: &InstallPlan, report: &InstallReport, stderr: &mut dyn Write) {
    if plan.quiet {
        return;
    }

    write_stderr_line(stderr, "");
    write_stderr_line(stderr, success_message(&report.artifact_path, &report.origin));

    if let Some(wrapper) = &report.wrapper {
        write_stderr_line(stderr, format!("Wrapper script created: {}", wrapper.script_path));
        if !wrapper.in_path {
            let bin_dir = wrapper
                .script_path
                .parent()
                .unwrap_or(&wrapper.script_path);
            write_stderr_line(stderr, path_instructions(bin_dir));
        }
    }

    if report.path_entry == Some(StepOutcome::Created)
        && let Some(rc_path) = &plan.rc_path
    {
        write_stderr_line(stderr, reload_hint(plan.shell, rc_path));
    }

    write_stderr_line(stderr, "");
    write_stderr_line(stderr, "You can now run: dna list");
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
