//! Long-running refresh loop.
//!
//! File system events and an optional periodic tick feed a [`RefreshCoordinator`],
//! which collapses them into debounced reconcile passes. Ctrl-C disposes the
//! coordinator and exits.

use crate::core::{
    command_init::{CliEngine, CommandContext},
    coordinator::RefreshCoordinator,
    error::{ChangelistError, Result},
    output::print_changelists,
    print_error, print_info,
};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub fn execute_watch(interval_secs: Option<u64>) -> Result<()> {
    let context = CommandContext::initialize()?;
    let interval = match interval_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => context.config.poll_interval(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(
        context.engine.clone(),
        context.root.clone(),
        context.config.debounce(),
        interval,
    ))
}

async fn watch(
    engine: Arc<CliEngine>,
    root: PathBuf,
    debounce: Duration,
    interval: Option<Duration>,
) -> Result<()> {
    engine.subscribe(|root, partition| {
        log::debug!(
            "Saved {} changelist(s) for {}",
            partition.lists.len(),
            root.display()
        );
        Ok(())
    });

    let coordinator = RefreshCoordinator::new(debounce, {
        let engine = engine.clone();
        let root = root.clone();
        move || {
            let engine = engine.clone();
            let root = root.clone();
            async move {
                let reconciliation = tokio::task::spawn_blocking(move || engine.reconcile(&root))
                    .await
                    .map_err(|e| ChangelistError::refresh_failed(e.to_string()))??;
                print_changelists(&reconciliation.partition, &reconciliation.snapshot);
                Ok(())
            }
        }
    })?;

    if let Err(e) = coordinator.request_now().await {
        print_error(&e.to_string());
    }

    let watcher = start_watcher(&root, coordinator.clone())?;
    let ticker = interval.map(|period| {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.tick().await;
            loop {
                ticks.tick().await;
                coordinator.trigger();
            }
        })
    });

    print_info(&format!(
        "Watching {} for changes (Ctrl-C to stop)",
        root.display()
    ));
    tokio::signal::ctrl_c().await?;

    coordinator.dispose();
    if let Some(ticker) = ticker {
        ticker.abort();
    }
    drop(watcher);

    print_info("Stopped watching");
    Ok(())
}

fn start_watcher(root: &Path, coordinator: RefreshCoordinator) -> Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if should_process_event(&event) {
                coordinator.trigger();
            }
        }
        Err(e) => log::warn!("File watcher error: {e}"),
    })?;
    watcher.watch(root, RecursiveMode::Recursive)?;
    Ok(watcher)
}

fn should_process_event(event: &Event) -> bool {
    !matches!(event.kind, EventKind::Access(_)) && event.paths.iter().any(|p| should_trigger(p))
}

/// Git's object store, reflogs and lock files churn on every git command without
/// changing status.
pub fn should_trigger(path: &Path) -> bool {
    if path.extension().is_some_and(|ext| ext == "lock") {
        return false;
    }

    let components: Vec<Component> = path.components().collect();
    !components.windows(2).any(|pair| {
        pair[0].as_os_str() == ".git"
            && (pair[1].as_os_str() == "objects" || pair[1].as_os_str() == "logs")
    })
}
