//! Flux WebSocket des observateurs.
//!
//! Cycle de vie : Connecting (upgrade HTTP accepté) → Active (snapshot
//! initial puis trames du hub) → Closed (départ du client ou canal fermé).
//! Chaque observateur vit dans sa propre tâche.

use crate::broadcast::{encode_frame, ObserverInfo};
use crate::http::AppState;
use crate::models::StreamMessage;
use crate::snapshot;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use time::OffsetDateTime;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use uuid::Uuid;

pub async fn ws_handler(ws: WebSocketUpgrade, State(app): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| observer_session(socket, app))
}

/// Trame de bienvenue d'un observateur : un snapshot complet, taggé
/// `initialState`, tiré du synthétiseur partagé à l'instant de la connexion.
pub fn initial_frame(app: &AppState) -> String {
    let mut synth = app.synth.lock();
    let built = snapshot::build_snapshot(&app.ctx, OffsetDateTime::now_utc(), &mut synth);
    encode_frame(&StreamMessage::InitialState(built))
}

/// Tâche d'un observateur, de l'upgrade à la fermeture.
///
/// L'abonnement au hub précède le snapshot initial : les trames de tick
/// émises pendant l'envoi initial restent en file et suivent dans l'ordre.
async fn observer_session(socket: WebSocket, app: AppState) {
    let observer_id = Uuid::new_v4();
    let mut frames = app.hub.subscribe();
    app.hub.register(
        observer_id,
        ObserverInfo { connected_at: OffsetDateTime::now_utc() },
    );

    let first = initial_frame(&app);

    let (mut sink, mut inbound) = socket.split();
    if sink.send(Message::Text(first.into())).await.is_err() {
        // parti avant même le premier snapshot
        app.hub.deregister(&observer_id);
        return;
    }

    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Ok(frame) => {
                    if sink.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // observateur trop lent : on saute les trames les plus
                    // anciennes, chaque snapshot étant complet en soi
                    warn!("observer {} lagging, skipped {} frames", observer_id, missed);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = inbound.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // flux en sortie uniquement
                Some(Err(e)) => {
                    debug!("observer {} socket error: {}", observer_id, e);
                    break;
                }
            },
        }
    }

    app.hub.deregister(&observer_id);
}
