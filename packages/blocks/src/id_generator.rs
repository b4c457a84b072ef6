use crc32fast::Hasher;

use crate::block::Block;

/// Derive a stable document seed from a campaign identifier using CRC32.
pub fn get_document_seed(campaign_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(campaign_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for blocks and columns within one document.
///
/// Ids are formatted `{seed}-{count}`. The generator is owned by the editor
/// document; every creation, duplication and template adoption draws from it.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(campaign_id: &str) -> Self {
        Self {
            seed: get_document_seed(campaign_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next sequential id.
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Advance the counter past every same-seed id found in an adopted tree,
    /// so a wholesale load never re-issues a live id.
    pub fn resume_past(&mut self, blocks: &[Block]) {
        let prefix = format!("{}-", self.seed);
        let mut max = self.count;
        collect_suffixes(blocks, &prefix, &mut max);
        self.count = max;
    }
}

fn collect_suffixes(blocks: &[Block], prefix: &str, max: &mut u32) {
    for block in blocks {
        note_id(&block.id, prefix, max);
        if let Some(cols) = block.settings.columns() {
            for column in &cols.columns {
                note_id(&column.id, prefix, max);
                collect_suffixes(&column.blocks, prefix, max);
            }
        }
    }
}

fn note_id(id: &str, prefix: &str, max: &mut u32) {
    if let Some(suffix) = id.strip_prefix(prefix) {
        if let Ok(n) = suffix.parse::<u32>() {
            *max = (*max).max(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BlockSettings, RichTextSettings};

    #[test]
    fn test_document_seed_is_stable() {
        let a = get_document_seed("campaign-1");
        let b = get_document_seed("campaign-1");
        assert_eq!(a, b);

        let c = get_document_seed("campaign-2");
        assert_ne!(a, c);
    }

    #[test]
    fn test_sequential_ids_share_seed() {
        let mut ids = IdGenerator::new("campaign-1");

        let id1 = ids.new_id();
        let id2 = ids.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(ids.seed()));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_resume_past_skips_adopted_ids() {
        let mut ids = IdGenerator::from_seed("abc".to_string());
        let adopted = vec![
            Block::new(
                "abc-7",
                BlockSettings::Text(RichTextSettings::default()),
            ),
            Block::new(
                "other-99",
                BlockSettings::Text(RichTextSettings::default()),
            ),
        ];

        ids.resume_past(&adopted);

        assert_eq!(ids.new_id(), "abc-8");
    }
}
