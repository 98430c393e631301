use crate::battle::action::ActionId;
use crate::encode::{MasterKey, SubKey};
use crate::policy::master::MasterTable;
use crate::policy::sub::SubTable;
use crate::Value;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

// both tables serialized as one zstd-compressed json blob. the format
// carries no version field; the loader treats anything it cannot parse
// as an empty start.
#[derive(Serialize, Deserialize, Default)]
struct Blob {
    master: Vec<((MasterKey, ActionId), Value)>,
    sub: Vec<(SubKey, Value)>,
}

/// write both tables durably. a temp file is written in full and then
/// renamed over the target, so a crash mid-save never corrupts an
/// existing checkpoint.
pub fn save(path: &Path, master: &MasterTable, sub: &SubTable) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let blob = Blob {
        master: master.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        sub: sub.iter().map(|(k, v)| (k.clone(), *v)).collect(),
    };
    let tmp = path.with_extension("tmp");
    {
        let file = File::create(&tmp)?;
        let mut encoder = zstd::Encoder::new(file, 0)?;
        serde_json::to_writer(&mut encoder, &blob)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        encoder.finish()?;
    }
    std::fs::rename(&tmp, path)?;
    log::info!(
        "saved checkpoint {} ({} master, {} sub entries)",
        path.display(),
        blob.master.len(),
        blob.sub.len()
    );
    Ok(())
}

/// read both tables back. missing file, truncated stream, or schema
/// mismatch all degrade to empty tables with a warning; never an error.
pub fn load(path: &Path) -> (MasterTable, SubTable) {
    match try_load(path) {
        Ok(blob) => {
            log::info!(
                "loaded checkpoint {} ({} master, {} sub entries)",
                path.display(),
                blob.master.len(),
                blob.sub.len()
            );
            (
                MasterTable::from_entries(blob.master),
                SubTable::from_entries(blob.sub),
            )
        }
        Err(e) => {
            log::warn!("starting fresh tables: {} ({})", path.display(), e);
            (MasterTable::default(), SubTable::default())
        }
    }
}

fn try_load(path: &Path) -> io::Result<Blob> {
    let file = File::open(path)?;
    let decoder = zstd::Decoder::new(file)?;
    serde_json::from_reader(decoder).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master_key(species: &str) -> MasterKey {
        MasterKey {
            own_species: species.to_string(),
            own_health: 1,
            own_status: 3,
            own_ability: "static".to_string(),
            own_boosted: true,
            own_max_boosted: false,
            faster: true,
            foe_species: "rhydon".to_string(),
            foe_health: 2,
            foe_status: 0,
            foe_boosted: false,
            foe_max_boosted: false,
        }
    }

    fn sub_key(cand: &str) -> SubKey {
        SubKey {
            foe_species: "rhydon".to_string(),
            foe_health: 2,
            foe_status: 0,
            cand_species: cand.to_string(),
            cand_health: 0,
            cand_status: 5,
            hazards: [true, false, true, false],
            faster: false,
        }
    }

    #[test]
    fn round_trip_preserves_every_entry() {
        let dir = std::env::temp_dir().join("battleq-checkpoint-roundtrip");
        let path = dir.join("tables.ckpt");
        let mut master = MasterTable::default();
        master.set(master_key("jolteon"), ActionId::Slot(0), 0.0);
        master.set(master_key("jolteon"), ActionId::Slot(3), -2.75);
        master.set(master_key("starmie"), ActionId::Delegate, 1e-12);
        let mut sub = SubTable::default();
        sub.set(sub_key("golem"), -0.5);
        sub.set(sub_key("snorlax"), 0.0);
        save(&path, &master, &sub).unwrap();
        let (master2, sub2) = load(&path);
        assert_eq!(master2.len(), master.len());
        for (key, value) in master.iter() {
            assert_eq!(master2.get(&key.0, key.1), *value);
        }
        assert_eq!(sub2.len(), sub.len());
        for (key, value) in sub.iter() {
            assert_eq!(sub2.get(key), *value);
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_starts_empty() {
        let path = std::env::temp_dir().join("battleq-no-such-checkpoint.ckpt");
        let (master, sub) = load(&path);
        assert!(master.is_empty());
        assert!(sub.is_empty());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = std::env::temp_dir().join("battleq-checkpoint-corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tables.ckpt");
        std::fs::write(&path, b"not a checkpoint at all").unwrap();
        let (master, sub) = load(&path);
        assert!(master.is_empty());
        assert!(sub.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn truncated_file_starts_empty() {
        let dir = std::env::temp_dir().join("battleq-checkpoint-truncated");
        let path = dir.join("tables.ckpt");
        let mut master = MasterTable::default();
        master.set(master_key("jolteon"), ActionId::Slot(0), 4.0);
        save(&path, &master, &SubTable::default()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
        let (master2, _) = load(&path);
        assert!(master2.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }
}
