//! Unit tests for the provisioning pipeline.

use super::*;
use crate::fetch::{FetchFailure, MockArtefactFetcher};
use crate::settings::{EnvSnapshot, SettingsOverrides};
use rstest::{fixture, rstest};

struct TestBed {
    _temp: tempfile::TempDir,
    plan: InstallPlan,
}

#[fixture]
fn testbed() -> TestBed {
    let temp = tempfile::tempdir().expect("tempdir");
    let home = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    let settings = InstallSettings::resolve(&SettingsOverrides::default(), &EnvSnapshot::default());
    let layout = InstallLayout::under_home(&home);
    let rc_path = home.join(".bashrc");
    let plan = InstallPlan {
        sources: ArtefactSources {
            local_candidates: Vec::new(),
            urls: settings.artifact_urls(),
        },
        settings,
        layout,
        shell: ShellFlavor::Bash,
        rc_path: Some(rc_path),
        variant: InstallVariant::User,
        quiet: true,
    };
    TestBed { _temp: temp, plan }
}

fn succeeding_fetcher(body: &'static str) -> MockArtefactFetcher {
    let mut fetcher = MockArtefactFetcher::new();
    fetcher.expect_fetch().returning(move |_, dest| {
        std::fs::write(dest, body)?;
        Ok(())
    });
    fetcher
}

fn failing_fetcher() -> MockArtefactFetcher {
    let mut fetcher = MockArtefactFetcher::new();
    fetcher.expect_fetch().returning(|url, _| {
        Err(FetchFailure::Http {
            url: url.to_owned(),
            reason: "connection refused".to_owned(),
        })
    });
    fetcher
}

#[rstest]
fn fresh_run_provisions_everything(testbed: TestBed) {
    let mut stderr = Vec::new();
    let report = run(&testbed.plan, &succeeding_fetcher("X"), &mut stderr).expect("run");

    assert_eq!(std::fs::read_to_string(&report.artifact_path).expect("read"), "X");
    assert_eq!(report.config, StepOutcome::Created);
    assert_eq!(report.path_entry, Some(StepOutcome::Created));
    assert!(report.wrapper.is_none());
    assert!(testbed.plan.layout.organisms_dir().as_std_path().is_dir());
    assert!(testbed.plan.layout.config_path().as_std_path().is_file());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(report.artifact_path.as_std_path())
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[rstest]
fn rerun_is_idempotent(testbed: TestBed) {
    let mut stderr = Vec::new();
    run(&testbed.plan, &succeeding_fetcher("X"), &mut stderr).expect("first run");

    let rc_path = testbed.plan.rc_path.clone().expect("rc path");
    let rc_after_first = std::fs::read_to_string(&rc_path).expect("read rc");
    let config_after_first =
        std::fs::read_to_string(testbed.plan.layout.config_path()).expect("read config");

    let report = run(&testbed.plan, &succeeding_fetcher("X"), &mut stderr).expect("second run");

    assert_eq!(report.config, StepOutcome::AlreadyPresent);
    assert_eq!(report.path_entry, Some(StepOutcome::AlreadyPresent));
    assert_eq!(std::fs::read_to_string(&rc_path).expect("read rc"), rc_after_first);
    assert_eq!(
        std::fs::read_to_string(testbed.plan.layout.config_path()).expect("read config"),
        config_after_first
    );
}

#[rstest]
fn fetch_failure_aborts_before_config_and_profile(testbed: TestBed) {
    let mut stderr = Vec::new();
    let err = run(&testbed.plan, &failing_fetcher(), &mut stderr).expect_err("should fail");

    assert!(matches!(err, crate::error::InstallerError::Fetch { .. }));
    assert!(!testbed.plan.artifact_dest().as_std_path().exists());
    assert!(!testbed.plan.layout.config_path().as_std_path().exists());
    let rc_path = testbed.plan.rc_path.clone().expect("rc path");
    assert!(!rc_path.as_std_path().exists());
    // Directories created before the failure remain; no rollback.
    assert!(testbed.plan.layout.bin_dir().as_std_path().is_dir());
}

#[rstest]
fn skipping_profile_leaves_rc_untouched(mut testbed: TestBed) {
    testbed.plan.rc_path = None;
    let mut stderr = Vec::new();
    let report = run(&testbed.plan, &succeeding_fetcher("X"), &mut stderr).expect("run");

    assert!(report.path_entry.is_none());
}

#[rstest]
fn existing_config_survives_rerun_with_different_settings(testbed: TestBed) {
    let mut stderr = Vec::new();
    run(&testbed.plan, &succeeding_fetcher("X"), &mut stderr).expect("first run");

    // A later run with a different registry must not rewrite the config.
    let overrides = SettingsOverrides {
        registry: Some("https://other.example/dna".to_owned()),
        ..SettingsOverrides::default()
    };
    let mut second = testbed.plan.clone();
    second.settings = InstallSettings::resolve(&overrides, &EnvSnapshot::default());

    run(&second, &succeeding_fetcher("X"), &mut stderr).expect("second run");
    let raw = std::fs::read_to_string(testbed.plan.layout.config_path()).expect("read");
    assert!(!raw.contains("other.example"));
}

#[cfg(unix)]
#[rstest]
fn global_variant_places_wrapper_and_artifact_under_prefix(testbed: TestBed) {
    let temp = tempfile::tempdir().expect("prefix tempdir");
    let prefix = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    let system = SystemLayout::at(prefix);

    let mut plan = testbed.plan.clone();
    plan.rc_path = None;
    plan.variant = InstallVariant::Global {
        system: system.clone(),
        owner: None,
    };

    let mut stderr = Vec::new();
    let report = run(&plan, &succeeding_fetcher("#!/usr/bin/env python3\n"), &mut stderr)
        .expect("run");

    assert_eq!(report.artifact_path, system.artifact_path());
    let wrapper = report.wrapper.expect("wrapper result");
    assert_eq!(wrapper.script_path, system.wrapper_path());
    let script = std::fs::read_to_string(wrapper.script_path.as_std_path()).expect("read");
    assert!(script.contains(system.artifact_path().as_str()));

    // The user tree is provisioned as well.
    assert!(plan.layout.config_path().as_std_path().is_file());
}

#[rstest]
fn quiet_run_writes_no_progress(testbed: TestBed) {
    let mut stderr = Vec::new();
    run(&testbed.plan, &succeeding_fetcher("X"), &mut stderr).expect("run");
    assert!(stderr.is_empty());
}

#[rstest]
fn verbose_run_reports_progress(mut testbed: TestBed) {
    testbed.plan.quiet = false;
    let mut stderr = Vec::new();
    run(&testbed.plan, &succeeding_fetcher("X"), &mut stderr).expect("run");

    let text = String::from_utf8(stderr).expect("utf8 stderr");
    assert!(text.contains("Provisioning directories"));
    assert!(text.contains("Fetching dna_cli.py"));
}
