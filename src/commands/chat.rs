use crate::args::ChatArgs;
use crate::commands::Out;
use crate::gallery::Gallery;
use crate::session::{Message, Session, Tab};
use crate::source::MockTransactions;
use crate::{Config, Result};
use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const GREETING: &str = "Hey there! 👋 I'm your Spend Sensei. Ask me anything about budgeting, \
    saving or investing. Type /habits for your money mindset, /meme for a roast, /quit to leave.";

/// The state of the conversation when `roast chat` finishes.
#[derive(Debug, Clone, Serialize)]
pub struct Chat {
    pub tab: Tab,
    pub transcript: Vec<Message>,
}

impl Chat {
    fn from_session(session: &Session) -> Self {
        Self {
            tab: session.active_tab(),
            transcript: session.transcript().to_vec(),
        }
    }
}

/// Replies to a single message, or runs an interactive session on stdin when there is none.
pub async fn chat(config: Config, args: &ChatArgs) -> Result<Out<Chat>> {
    let mut session = Session::new(
        &MockTransactions,
        config.renderer().await?,
        config.period_count(),
        config.currency_symbol(),
    );

    match args.message() {
        Some(message) => {
            let reply = session.send(&message).unwrap_or_default();
            Ok(Out::new(reply, Chat::from_session(&session)))
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            converse(&mut session, stdin, &config.gallery(), config.typing_delay()).await?;
            Ok(Out::new(
                "Bye! Go easy on the biryani.",
                Chat::from_session(&session),
            ))
        }
    }
}

/// Reads lines from `input` until it ends or the user types `/quit`.
async fn converse<R>(
    session: &mut Session,
    input: R,
    gallery: &Gallery,
    typing_delay: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut rng = ChaCha8Rng::seed_from_u64(rand::random());
    let mut lines = input.lines();
    println!("{GREETING}");

    while let Some(line) = lines
        .next_line()
        .await
        .context("Unable to read from stdin")?
    {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/coach" => {
                session.activate(Tab::Coach)?;
                println!("{GREETING}");
            }
            "/habits" => match session.activate(Tab::Habits) {
                Ok(()) => {
                    if let Some(analysis) = session.analysis() {
                        println!("{analysis}");
                    }
                }
                Err(e) => warn!("No insights available: {e}"),
            },
            "/meme" => match session.refresh_meme(&mut rng) {
                Some(image) => {
                    let path = gallery.save(image).await?;
                    println!("{} {}", image.content().emoji, image.content().roast);
                    println!("Saved to '{}'", path.display());
                }
                None => println!("Failed to generate meme."),
            },
            "" => {}
            text => {
                debug!("Spend Sensei is typing...");
                tokio::time::sleep(typing_delay).await;
                if let Some(reply) = session.send(text) {
                    println!("{reply}");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::DEFAULT_REPLY;
    use crate::meme::MemeRenderer;
    use crate::session::Role;
    use crate::test::TestEnv;

    fn session(config: &Config) -> Session {
        Session::new(
            &MockTransactions,
            MemeRenderer::default(),
            config.period_count(),
            config.currency_symbol(),
        )
    }

    #[tokio::test]
    async fn test_chat_single_message() {
        let env = TestEnv::new().await;
        let out = chat(env.config(), &ChatArgs::new("How do I BUDGET?"))
            .await
            .unwrap();
        assert!(out.message().contains("Food Fun"));
        let chat = out.structure();
        assert_eq!(chat.transcript.len(), 2);
        assert_eq!(chat.transcript[0].role, Role::User);
        assert_eq!(chat.transcript[1].role, Role::Bot);
    }

    #[tokio::test]
    async fn test_chat_blank_message() {
        let env = TestEnv::new().await;
        let out = chat(env.config(), &ChatArgs::new("   ")).await.unwrap();
        assert!(out.message().is_empty());
        assert!(out.structure().transcript.is_empty());
    }

    #[tokio::test]
    async fn test_converse() {
        let env = TestEnv::new().await;
        let config = env.config();
        let mut session = session(&config);
        let input: &[u8] = b"hello\n\n/habits\n/meme\n/coach\nshould I invest?\n/quit\nignored\n";

        converse(&mut session, input, &config.gallery(), Duration::ZERO)
            .await
            .unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[1].content, DEFAULT_REPLY);
        assert_eq!(transcript[2].content, "should I invest?");
        assert_eq!(session.active_tab(), Tab::Coach);
        assert!(session.analysis().is_some());
        assert!(session.meme().is_some());
        assert_eq!(std::fs::read_dir(config.memes()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_converse_until_eof() {
        let env = TestEnv::new().await;
        let config = env.config();
        let mut session = session(&config);
        let input: &[u8] = b"save";
        converse(&mut session, input, &config.gallery(), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(session.transcript().len(), 2);
    }
}
