use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::{Assistant, LlmProxy, ProxyClient};
use crate::chat::{self, ChatLogWriter, Message, SendOutcome, Sender, SessionStore, Transcript};
use crate::core::AppConfig;
use crate::core::logging::init_tracing;

pub fn print_message(msg: &Message) {
    let who = match msg.sender {
        Sender::User => "you",
        Sender::Ai => "ai",
    };
    let at = msg.created_at.with_timezone(&Local).format("%H:%M:%S");
    println!("[{}] {}: {}", at, who, msg.text);
}

pub async fn run(proxy_url: Option<String>, agent: Option<String>) -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing("agentdash=warn");

    // The session has to be known before anything touches the chat log
    let session_id = SessionStore::new(config.local_storage_path()).get_or_create_session_id()?;
    let chat_log = chat::connect(&config).await?;
    let writer = ChatLogWriter::spawn(chat_log.clone());

    let assistant: Arc<dyn Assistant> = match proxy_url {
        Some(url) => Arc::new(ProxyClient::new(
            &url,
            Duration::from_secs(config.request_timeout_secs),
        )),
        None => Arc::new(LlmProxy::new(&config)),
    };

    let transcript = Transcript::new(session_id, chat_log, writer, assistant).with_agent(agent, None);
    transcript.initialize().await;
    for msg in transcript.messages().iter() {
        print_message(msg);
    }

    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if let SendOutcome::Replied { reply, .. } =
                    transcript.send_user_message(&line).await
                {
                    print_message(&reply);
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    // Give queued writes a chance before the runtime shuts down
    transcript.flush().await;

    Ok(())
}
