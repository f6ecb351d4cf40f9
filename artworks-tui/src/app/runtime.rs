//! Main event loop.

use std::sync::Arc;

use artworks_lib::api::PageSource;
use artworks_lib::browser::PendingLoad;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use log::{debug, info, trace};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{self, MissedTickBehavior};

use crate::error::AppError;
use crate::terminal::TerminalGuard;

use super::{App, CompletedLoad};

/// Run the app until the user quits.
///
/// Terminal events and fetch completions are multiplexed with
/// `tokio::select!`. Fetches run as independent tasks and are never
/// cancelled; the browser discards whichever completions are stale.
pub async fn run(
    app: &mut App,
    source: Arc<dyn PageSource>,
    terminal: &mut TerminalGuard,
) -> Result<(), AppError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<CompletedLoad>();
    let mut events = EventStream::new();
    let mut ticker = time::interval(app.spinner_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    spawn_load(&source, app.start(), &tx);
    terminal.draw(app)?;

    while !app.should_quit() {
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    trace!("Key event: {:?}", key);
                    if let Some(pending) = app.handle_key(key) {
                        spawn_load(&source, pending, &tx);
                    }
                }
                Some(Ok(Event::Resize(width, height))) => {
                    debug!("Terminal resized to {}x{}", width, height);
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => {
                    info!("Terminal event stream closed");
                    break;
                }
            },
            Some(done) = rx.recv() => app.apply_load(done),
            _ = ticker.tick(), if app.browser().state().loading() => app.tick(),
        }

        terminal.draw(app)?;
    }

    Ok(())
}

/// Fetch a page on a separate task and report back over the channel.
fn spawn_load(source: &Arc<dyn PageSource>, pending: PendingLoad, tx: &UnboundedSender<CompletedLoad>) {
    let source = Arc::clone(source);
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = source.fetch_page(&pending.request).await;
        if tx
            .send(CompletedLoad {
                seq: pending.seq,
                result,
            })
            .is_err()
        {
            debug!("Dropping result of load {}: app has exited", pending.seq);
        }
    });
}
