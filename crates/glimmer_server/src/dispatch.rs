//! Outbound effect broadcast.

use glimmer_proto::EffectMessage;
use glimmer_world::Position;
use tracing::{debug, warn};

use crate::spectator::SpectatorResolver;

/// Broadcast an effect message to every spectator of `position`.
///
/// Spectators that never negotiated the attached-effects capability are
/// skipped silently; that is the feature gate working, not a fault. The frame
/// is encoded per connection and enqueued on each spectator's outbound queue.
/// A connection whose queue has closed is logged and skipped; one dead
/// connection never aborts delivery to the rest. A message that cannot be
/// encoded is logged and delivered to no one.
///
/// Returns the number of connections the frame was enqueued on.
pub fn broadcast_effect<R: SpectatorResolver>(
    resolver: &R,
    position: Position,
    message: &EffectMessage,
) -> usize {
    let spectators = resolver.spectators_of(position, true, true);
    let mut delivered = 0;
    for spectator in &spectators {
        if !spectator.capabilities().attached_effects {
            debug!(
                connection = %spectator.id(),
                opcode = format_args!("0x{:02X}", message.opcode()),
                "spectator lacks the attached-effects capability, skipping"
            );
            continue;
        }
        let frame = match message.encode() {
            Ok(frame) => frame,
            Err(error) => {
                // Encoding depends only on the message, so it fails the same
                // way for every recipient.
                warn!(
                    %error,
                    opcode = format_args!("0x{:02X}", message.opcode()),
                    "effect message cannot be encoded, broadcast abandoned"
                );
                break;
            }
        };
        if spectator.send(frame) {
            delivered += 1;
        } else {
            warn!(
                connection = %spectator.id(),
                opcode = format_args!("0x{:02X}", message.opcode()),
                "outbound queue closed, frame dropped"
            );
        }
    }
    delivered
}
