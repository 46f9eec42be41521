//! Line-oriented chat loop over any async reader and writer.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::FrontDesk;

pub const RESET_COMMAND: &str = "/reset";

/// Printed when a turn ends without any assistant text, typically because the
/// tool round-trip limit cut it short.
pub const NO_ANSWER_MESSAGE: &str =
    "Sorry, I couldn't finish answering that. Could you rephrase or ask again?";

/// Reads one user message per line until `exit`, `quit`, an empty line, or EOF.
///
/// Model failures print the apology and keep the session for the next line.
pub async fn run_repl<R, W>(
    frontdesk: &FrontDesk,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut session = frontdesk.start_session();

    output
        .write_all(b"Type your message (or 'exit'). Use /reset to start over.\n")
        .await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text.is_empty() || matches!(text.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        if text == RESET_COMMAND {
            session = frontdesk.chat.reset(session);
            tracing::info!(
                phase = "repl",
                event = "session_reset",
                session_id = session.id()
            );
            output.write_all(b"(conversation reset)\n").await?;
            continue;
        }

        let reply = match frontdesk.chat.run_turn(&mut session, text).await {
            Ok(turn) => {
                if turn.tool_round_limit_reached {
                    tracing::warn!(
                        phase = "repl",
                        event = "tool_round_limit_reached",
                        session_id = session.id(),
                        round_trips = turn.tool_round_trips
                    );
                }
                if turn.assistant_message.trim().is_empty() {
                    NO_ANSWER_MESSAGE.to_string()
                } else {
                    turn.assistant_message
                }
            }
            Err(error) => {
                tracing::error!(
                    phase = "repl",
                    event = "turn_failed",
                    session_id = session.id(),
                    error_kind = ?error.kind,
                    provider_error = error.provider_kind.map(|kind| kind.as_str()),
                    retryable = error.is_retryable(),
                    error = %error
                );
                error.user_facing_message().to_string()
            }
        };

        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    output.flush().await
}
