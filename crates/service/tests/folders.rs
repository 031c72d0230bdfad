use std::time::Duration;

use tokio::sync::watch;

use common::prelude::{FolderId, FolderNavigator, NewFile};
use service::{FolderSession, Notifier, ServiceConfig, ServiceState, MIN_UPLOAD_TICK};

fn empty_session() -> FolderSession {
    let (notifier, _toasts) = Notifier::channel();
    FolderSession::new(FolderNavigator::new(), notifier, Duration::from_millis(300))
}

#[test]
fn file_lands_in_new_folder() -> anyhow::Result<()> {
    let mut session = empty_session();

    let work = session.create_folder("Work")?;
    session.navigate_to(&work.id)?;
    let (tx, _progress) = watch::channel(0u8);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()?;
    rt.block_on(session.upload(NewFile::new("a.txt", 2048), &tx))?;

    let listing = session.navigator().listing_of(&work.id);
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].name, "a.txt");
    assert!(session.navigator().is_consistent());
    Ok(())
}

#[test]
fn rename_keeps_breadcrumb_in_step() -> anyhow::Result<()> {
    let mut session = empty_session();

    let a = session.create_folder("A")?;
    session.navigate_to(&a.id)?;
    let b = session.create_folder("B")?;
    session.navigate_to(&b.id)?;
    let c = session.create_folder("C")?;
    session.navigate_to(&c.id)?;

    let ids: Vec<FolderId> = session.breadcrumbs().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, [a.id.clone(), b.id.clone(), c.id.clone()]);

    session.rename(&b.id, "Renamed")?;
    let names: Vec<String> = session.breadcrumbs().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["A", "Renamed", "C"]);
    assert_eq!(
        session.navigator().entry(&b.id).map(|e| e.name.as_str()),
        Some("Renamed")
    );
    Ok(())
}

#[test]
fn deleting_an_ancestor_sends_view_home() -> anyhow::Result<()> {
    let mut session = empty_session();

    let a = session.create_folder("A")?;
    session.navigate_to(&a.id)?;
    let b = session.create_folder("B")?;
    session.navigate_to(&b.id)?;

    session.delete(&a.id)?;
    assert!(session.current().is_root());
    assert!(session.listing().is_empty());
    assert!(!session.navigator().contains_folder(&b.id));
    assert!(session.navigator().is_consistent());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn upload_uses_configured_tick() -> anyhow::Result<()> {
    let config = ServiceConfig {
        upload_tick: Duration::from_millis(100),
        sample_tree: false,
        ..Default::default()
    };
    let state = ServiceState::from_config(&config)?;
    let toasts = state.toasts();
    let mut session = state.folder_session();
    let (tx, progress) = watch::channel(0u8);

    let start = tokio::time::Instant::now();
    session.upload(NewFile::new("photo.jpg", 3_145_728), &tx).await?;

    assert_eq!(start.elapsed(), Duration::from_millis(1100));
    assert_eq!(*progress.borrow(), 100);
    assert_eq!(session.listing()[0].size.as_deref(), Some("3.00 MB"));
    assert_eq!(toasts.try_recv()?.title, "File uploaded successfully");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn zero_tick_upload_still_completes() -> anyhow::Result<()> {
    let (notifier, toasts) = Notifier::channel();
    let mut session = FolderSession::new(FolderNavigator::new(), notifier, Duration::ZERO);
    let (tx, progress) = watch::channel(0u8);

    let start = tokio::time::Instant::now();
    let entry = session.upload(NewFile::new("empty.txt", 0), &tx).await?;

    assert_eq!(start.elapsed(), MIN_UPLOAD_TICK * 11);
    assert_eq!(*progress.borrow(), 100);
    assert_eq!(session.listing()[0].id, entry.id);
    assert_eq!(toasts.try_recv()?.title, "File uploaded successfully");
    Ok(())
}
