//! End-to-end synchronization scenarios over real temporary directories

use filetime::FileTime;
use stagesync_engine::{AutoProceed, AutoSkip, SyncDriver, SyncOptions, SyncRequest};
use stagesync_types::{CopyOutcome, SubdirNote};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn plant(dir: &Path, name: &str, mtime_secs: i64, content: &str) {
    fs::write(dir.join(name), content).unwrap();
    filetime::set_file_mtime(dir.join(name), FileTime::from_unix_time(mtime_secs, 0)).unwrap();
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn fresh_target_receives_only_the_latest_file() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("ProjectA");
    fs::create_dir(&project).unwrap();
    plant(&project, "build_1.2.3.exe", 1_704_067_200, "old"); // 2024-01-01
    plant(&project, "build_1.2.4.exe", 1_717_200_000, "new"); // 2024-06-01

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);
    let request = SyncRequest::new(source.path(), target.path()).with_options(SyncOptions {
        clean_old: true,
        ..SyncOptions::default()
    });

    let result = driver.sync(request).await.unwrap();

    assert_eq!(listing(&target.path().join("ProjectA")), vec!["build_1.2.4.exe"]);
    assert_eq!(result.reports.len(), 1);
    let report = &result.reports[0];
    assert_eq!(report.name, "ProjectA");
    assert!(report.deletions.is_empty());
    assert_eq!(report.copies.len(), 1);
    assert_eq!(report.copies[0].outcome, CopyOutcome::Copied);
    assert_eq!(result.stats.files_copied, 1);
    assert_eq!(result.stats.files_deleted, 0);
}

#[tokio::test]
async fn clean_old_removes_stale_files() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("ProjectA");
    fs::create_dir(&project).unwrap();
    plant(&project, "a_2.0.exe", 2_000, "v2");

    let target_project = target.path().join("ProjectA");
    fs::create_dir(&target_project).unwrap();
    plant(&target_project, "a_1.0.exe", 1_000, "v1");
    plant(&target_project, "a_2.0.exe", 1_500, "stale v2");

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);
    let request = SyncRequest::new(source.path(), target.path()).with_options(SyncOptions {
        clean_old: true,
        ..SyncOptions::default()
    });

    let result = driver.sync(request).await.unwrap();

    assert_eq!(listing(&target_project), vec!["a_2.0.exe"]);
    let report = &result.reports[0];
    assert_eq!(report.deletions.len(), 1);
    assert_eq!(report.deletions[0].name, "a_1.0.exe");
    assert!(report.deletions[0].result.is_ok());
    // The file named in the latest set was replaced, never deleted.
    assert_eq!(report.copies[0].outcome, CopyOutcome::Replaced);
    assert_eq!(fs::read_to_string(target_project.join("a_2.0.exe")).unwrap(), "v2");
}

#[tokio::test]
async fn ties_at_the_maximum_are_all_copied() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("Suite");
    fs::create_dir(&project).unwrap();
    plant(&project, "old_0.9.exe", 1_000, "old");
    plant(&project, "cli_1.0.exe", 2_000, "cli");
    plant(&project, "gui_1.0.exe", 2_000, "gui");

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);
    let request = SyncRequest::new(source.path(), target.path());

    let result = driver.sync(request).await.unwrap();

    assert_eq!(
        listing(&target.path().join("Suite")),
        vec!["cli_1.0.exe", "gui_1.0.exe"]
    );
    assert_eq!(result.stats.files_copied, 2);
}

#[tokio::test]
async fn sync_twice_is_idempotent() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("ProjectA");
    fs::create_dir(&project).unwrap();
    plant(&project, "app_3.1.exe", 3_000, "payload");

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);

    let first = driver
        .sync(SyncRequest::new(source.path(), target.path()))
        .await
        .unwrap();
    let after_first = listing(&target.path().join("ProjectA"));

    let second = driver
        .sync(SyncRequest::new(source.path(), target.path()))
        .await
        .unwrap();
    let after_second = listing(&target.path().join("ProjectA"));

    assert_eq!(after_first, after_second);
    assert_eq!(first.reports[0].copies[0].outcome, CopyOutcome::Copied);
    assert_eq!(second.reports[0].copies[0].outcome, CopyOutcome::Replaced);
    assert_eq!(
        fs::read_to_string(target.path().join("ProjectA").join("app_3.1.exe")).unwrap(),
        "payload"
    );
}

#[tokio::test]
async fn declined_overwrite_leaves_destination_untouched() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("ProjectA");
    fs::create_dir(&project).unwrap();
    plant(&project, "app_2.0.exe", 5_000, "incoming");

    let target_project = target.path().join("ProjectA");
    fs::create_dir(&target_project).unwrap();
    plant(&target_project, "app_2.0.exe", 1_000, "precious");

    let mut decider = AutoSkip;
    let mut driver = SyncDriver::new(&mut decider);
    let request = SyncRequest::new(source.path(), target.path());

    let result = driver.sync(request).await.unwrap();

    assert_eq!(
        result.reports[0].copies[0].outcome,
        CopyOutcome::SkippedByUser
    );
    assert_eq!(
        fs::read_to_string(target_project.join("app_2.0.exe")).unwrap(),
        "precious"
    );
    let mtime = FileTime::from_system_time(
        fs::metadata(target_project.join("app_2.0.exe"))
            .unwrap()
            .modified()
            .unwrap(),
    );
    assert_eq!(mtime, FileTime::from_unix_time(1_000, 0));
    assert_eq!(result.stats.files_skipped, 1);
    assert_eq!(result.stats.files_written(), 0);
}

#[tokio::test]
async fn unversioned_subdirectory_reports_no_qualifying_files() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("Docs");
    fs::create_dir(&project).unwrap();
    plant(&project, "notes.txt", 1_000, "n");

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);
    let request = SyncRequest::new(source.path(), target.path());

    let result = driver.sync(request).await.unwrap();

    let report = &result.reports[0];
    assert_eq!(report.note, Some(SubdirNote::NoQualifyingFiles));
    assert!(report.copies.is_empty());
    // The target subdirectory is still created, just left empty.
    let target_project = target.path().join("Docs");
    assert!(target_project.is_dir());
    assert!(listing(&target_project).is_empty());
}

#[tokio::test]
async fn copied_files_keep_the_source_mtime() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("ProjectA");
    fs::create_dir(&project).unwrap();
    plant(&project, "app_1.0.exe", 42_000, "data");

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);
    driver
        .sync(SyncRequest::new(source.path(), target.path()))
        .await
        .unwrap();

    let copied = target.path().join("ProjectA").join("app_1.0.exe");
    let mtime = FileTime::from_system_time(fs::metadata(&copied).unwrap().modified().unwrap());
    assert_eq!(mtime, FileTime::from_unix_time(42_000, 0));
}

#[tokio::test]
async fn dry_run_records_outcomes_without_writing() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let project = source.path().join("ProjectA");
    fs::create_dir(&project).unwrap();
    plant(&project, "app_1.0.exe", 1_000, "data");

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);
    let request = SyncRequest::new(source.path(), target.path()).with_options(SyncOptions {
        dry_run: true,
        clean_old: true,
        ..SyncOptions::default()
    });

    let result = driver.sync(request).await.unwrap();

    assert_eq!(result.reports[0].copies[0].outcome, CopyOutcome::Copied);
    assert!(!target.path().join("ProjectA").exists());
}

#[tokio::test]
async fn multiple_subdirectories_are_processed_independently() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    for (project, file) in [("Alpha", "alpha_1.0.exe"), ("Beta", "beta_2.0.exe")] {
        let dir = source.path().join(project);
        fs::create_dir(&dir).unwrap();
        plant(&dir, file, 1_000, project);
    }
    // A loose file at the source root is not a project subdirectory.
    plant(source.path(), "stray_9.9.exe", 1_000, "stray");

    let mut decider = AutoProceed;
    let mut driver = SyncDriver::new(&mut decider);
    let result = driver
        .sync(SyncRequest::new(source.path(), target.path()))
        .await
        .unwrap();

    assert_eq!(result.reports.len(), 2);
    assert!(target.path().join("Alpha").join("alpha_1.0.exe").is_file());
    assert!(target.path().join("Beta").join("beta_2.0.exe").is_file());
    assert!(!target.path().join("stray_9.9.exe").exists());
}
