use crate::epic;
use crate::global::Global;
use crate::message;
use crate::telegram::{self, Delivery};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// One pass: fetch the catalog once, then post one message per free game in
/// catalog order. A failed delivery does not stop the ones after it.
#[tracing::instrument(name = "relay", skip_all)]
pub async fn run(global: &Global) -> RunSummary {
    tracing::info!("checking epic for free games");

    let games = epic::fetch_free_base_games(global).await;

    let mut summary = RunSummary {
        found: games.len(),
        ..RunSummary::default()
    };

    if games.is_empty() {
        tracing::info!("no free games right now (or the promotions payload changed)");
        return summary;
    }

    tracing::info!(count = games.len(), "found free games");

    for game in &games {
        tracing::debug!(title = %game.title, end_date = %game.end_date, "notifying");

        match telegram::send(global, &message::render(game)).await {
            Delivery::Sent => summary.sent += 1,
            Delivery::Failed => summary.failed += 1,
            Delivery::Skipped => summary.skipped += 1,
        }
    }

    tracing::info!(
        found = summary.found,
        sent = summary.sent,
        failed = summary.failed,
        skipped = summary.skipped,
        "run complete"
    );

    summary
}
