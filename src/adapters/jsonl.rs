use crate::domain::model::Pass;
use crate::domain::ports::{LedgerConfig, PassLedger};
use crate::utils::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Durable ledger: one JSON-encoded `Pass` per line, append only.
///
/// Appends hold the write lock until the line is synced to disk, so readers
/// never observe a half-written record from this process. A record torn by
/// a crash is skipped on read and only costs its own owner that pass.
///
/// Every lookup re-reads and parses the whole file, so `passes_for` (and
/// therefore each entitlement check) is O(ledger size).
#[derive(Debug, Clone)]
pub struct JsonlLedger {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl JsonlLedger {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(RwLock::new(())),
        }
    }

    pub fn from_config<C: LedgerConfig>(config: &C) -> Self {
        Self::new(config.ledger_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Pass>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut passes = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            // 損壞的紀錄只跳過，不影響其他使用者
            match serde_json::from_str::<Pass>(line) {
                Ok(pass) => passes.push(pass),
                Err(e) => tracing::warn!(
                    "Skipping unreadable ledger record at {}:{}: {}",
                    self.path.display(),
                    line_no + 1,
                    e
                ),
            }
        }
        Ok(passes)
    }
}

/// 檔案非空且最後一個位元組不是換行時回傳 true
fn ends_mid_line(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl PassLedger for JsonlLedger {
    async fn append(&self, pass: &Pass) -> Result<()> {
        let mut line = serde_json::to_string(pass)?;
        line.push('\n');

        let _guard = self.lock.write().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // 上次寫入中斷時，先補上換行再寫新紀錄
        if ends_mid_line(&mut file)? {
            tracing::warn!(
                "Ledger {} ends with a torn record, starting a new line",
                self.path.display()
            );
            line.insert(0, '\n');
        }

        file.write_all(line.as_bytes())?;
        file.sync_all()?;

        tracing::debug!("Appended pass {} to {}", pass.id, self.path.display());
        Ok(())
    }

    async fn passes_for(&self, owner_id: &str) -> Result<Vec<Pass>> {
        let _guard = self.lock.read().await;
        let passes = self.read_all()?;
        Ok(passes
            .into_iter()
            .filter(|pass| pass.owner_id == owner_id)
            .collect())
    }
}
