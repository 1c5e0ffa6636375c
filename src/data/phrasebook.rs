use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    pub english: &'static str,
    pub hanzi: &'static str,
    pub pinyin: &'static str,
}

impl fmt::Display for PhraseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hanzi, self.pinyin)
    }
}

const fn entry(english: &'static str, hanzi: &'static str, pinyin: &'static str) -> PhraseEntry {
    PhraseEntry {
        english,
        hanzi,
        pinyin,
    }
}

static ENTRIES: [PhraseEntry; 15] = [
    entry("hello", "你好", "Nǐ hǎo"),
    entry("how are you", "你好吗", "Nǐ hǎo ma"),
    entry("goodbye", "再见", "Zàijiàn"),
    entry("thank you", "谢谢", "Xièxiè"),
    entry("i love you", "我爱你", "Wǒ ài nǐ"),
    entry("good morning", "早安", "Zǎo ān"),
    entry("good night", "晚安", "Wǎn ān"),
    entry("friend", "朋友", "Péngyǒu"),
    entry("teacher", "老师", "Lǎoshī"),
    entry("student", "学生", "Xuésheng"),
    entry("cat", "猫", "Māo"),
    entry("dog", "狗", "Gǒu"),
    entry("happy", "快乐", "Kuàilè"),
    entry("water", "水", "Shuǐ"),
    entry("coffee", "咖啡", "Kāfēi"),
];

/// Fixed English to Mandarin phrase table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phrasebook;

impl Phrasebook {
    /// Case-insensitive lookup on the trimmed input.
    pub fn lookup(&self, input: &str) -> Option<&'static PhraseEntry> {
        let key = input.trim().to_lowercase();
        ENTRIES.iter().find(|entry| entry.english == key)
    }

    pub fn entries(&self) -> &'static [PhraseEntry] {
        &ENTRIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_normalizes_input() {
        let entry = Phrasebook.lookup("  Thank You ").unwrap();
        assert_eq!(entry.hanzi, "谢谢");
        assert_eq!(entry.to_string(), "谢谢 (Xièxiè)");
    }

    #[test]
    fn unknown_phrase_misses() {
        assert!(Phrasebook.lookup("spaceship").is_none());
        assert!(Phrasebook.lookup("").is_none());
    }

    #[test]
    fn every_entry_is_reachable_by_lookup() {
        let entries = Phrasebook.entries();
        assert_eq!(entries.len(), 15);
        for phrase in entries {
            assert_eq!(Phrasebook.lookup(phrase.english), Some(phrase));
        }
    }
}
