use tokio::{
    io::{stdin, AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::warn;

/// Spawns the control surface: a task reading stdin line by line and
/// feeding normalized command words into a channel shared by every
/// screen. The task ends when stdin closes or the receiving side is
/// dropped.
pub fn spawn_command_reader() -> mpsc::Receiver<String> {
    let (sender, receiver) = mpsc::channel(8);
    tokio::spawn(async move {
        let mut lines = BufReader::new(stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let command = line.trim().to_lowercase();
                    if command.is_empty() {
                        continue;
                    }
                    if sender.send(command).await.is_err() {
                        return;
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    warn!("Error reading commands {e:?}");
                    return;
                }
            }
        }
    });
    receiver
}
