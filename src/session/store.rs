use std::{future::Future, io::ErrorKind, path::PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};
use tracing::{debug, warn};

use crate::utils::format::date_to_session_name;

use super::entities::PhaseRecordEntity;

/// Interface for abstracting storage of completed phases. Records for one
/// UTC day share a file.
pub trait SessionStore {
    fn append(&self, record: PhaseRecordEntity) -> impl Future<Output = Result<()>>;

    fn read_day(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<PhaseRecordEntity>>>;
}

/// The main realization of [SessionStore]. Files are locked through fs4
/// because `history` may read a day while a running timer appends to it.
pub struct SessionStoreImpl {
    session_dir: PathBuf,
}

impl SessionStoreImpl {
    pub fn new(session_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&session_dir)?;

        Ok(Self { session_dir })
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.session_dir.join(date_to_session_name(date))
    }

    async fn read_day_inner(&self, path: PathBuf) -> Result<Vec<PhaseRecordEntity>> {
        let file = match File::open(&path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        debug!("Reading session file {path:?}");
        file.lock_shared()?;

        let buffer = BufReader::new(file);
        let mut lines = buffer.lines();
        let mut records = vec![];
        while let Ok(Some(v)) = lines.next_line().await {
            match serde_json::from_str::<PhaseRecordEntity>(&v) {
                Ok(v) => records.push(v),
                Err(e) => {
                    // ignore illegal values. Might happen after shutdowns
                    warn!("During parsing in path {path:?} found illegal json string {v}: {e}")
                }
            }
        }

        lines.into_inner().into_inner().unlock_async().await?;

        Ok(records)
    }
}

impl SessionStore for SessionStoreImpl {
    async fn append(&self, record: PhaseRecordEntity) -> Result<()> {
        let path = self.day_path(record.completed_at.date_naive());

        let mut file = File::options()
            .append(true)
            .create(true)
            .open(path)
            .await?;

        file.lock_exclusive()?;
        let result = append_with_file(&mut file, &record).await;
        file.unlock_async().await?;
        result
    }

    async fn read_day(&self, date: NaiveDate) -> Result<Vec<PhaseRecordEntity>> {
        self.read_day_inner(self.day_path(date)).await
    }
}

async fn append_with_file(file: &mut File, record: &PhaseRecordEntity) -> Result<()> {
    let mut buffer = serde_json::to_vec(record)?;
    buffer.push(b'\n');
    file.write_all(&buffer).await?;
    file.flush().await?;
    Ok(())
}
