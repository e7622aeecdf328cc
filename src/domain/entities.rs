//! Domain entities: symbols, frequency tables and code records

use std::fmt;

/// One unit of the input alphabet.
pub type Symbol = u8;

/// Number of distinct symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Per-symbol occurrence counts over the full byte alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// All-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Sequential single-pass count, the baseline for the parallel aggregator.
    pub fn from_text(text: &[u8]) -> Self {
        let mut table = Self::new();
        for &symbol in text {
            table.increment(symbol);
        }
        table
    }

    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn increment(&mut self, symbol: Symbol) {
        self.counts[symbol as usize] += 1;
    }

    /// Add every count of `other` into `self`.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Sum of all counts; equals the length of the counted text.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Non-zero entries in ascending symbol order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as Symbol, count))
    }

}

impl From<[u64; ALPHABET_SIZE]> for FrequencyTable {
    fn from(counts: [u64; ALPHABET_SIZE]) -> Self {
        Self { counts }
    }
}

/// One row of the code table: a symbol, its weight and its prefix code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRecord {
    pub symbol: Symbol,
    pub frequency: u64,
    /// Bits as `'0'`/`'1'` characters, root to leaf.
    pub code: String,
}

impl CodeRecord {
    pub fn code_len(&self) -> usize {
        self.code.len()
    }
}

impl fmt::Display for CodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            render_symbol(self.symbol),
            self.frequency,
            self.code
        )
    }
}

/// Printable form of a symbol. Control and non-ASCII bytes are escaped so
/// every record stays on one tab-separated line.
pub fn render_symbol(symbol: Symbol) -> String {
    match symbol {
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        b'\r' => "\\r".to_string(),
        b'\\' => "\\\\".to_string(),
        0x20..=0x7e => (symbol as char).to_string(),
        _ => format!("\\x{:02x}", symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_counts_every_byte() {
        let table = FrequencyTable::from_text(b"ABRACADABRA");
        assert_eq!(table.get(b'A'), 5);
        assert_eq!(table.get(b'B'), 2);
        assert_eq!(table.get(b'R'), 2);
        assert_eq!(table.get(b'C'), 1);
        assert_eq!(table.get(b'D'), 1);
        assert_eq!(table.total(), 11);
        assert_eq!(table.distinct(), 5);
    }

    #[test]
    fn test_merge_sums_counts() {
        let mut left = FrequencyTable::from_text(b"aab");
        let right = FrequencyTable::from_text(b"bc");
        left.merge(&right);
        assert_eq!(left, FrequencyTable::from_text(b"aabbc"));
    }

    #[test]
    fn test_iter_nonzero_is_ascending() {
        let table = FrequencyTable::from_text(b"zya");
        let symbols: Vec<Symbol> = table.iter_nonzero().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'a', b'y', b'z']);
    }

    #[test]
    fn test_render_symbol_escapes_control_bytes() {
        assert_eq!(render_symbol(b'A'), "A");
        assert_eq!(render_symbol(b' '), " ");
        assert_eq!(render_symbol(b'\n'), "\\n");
        assert_eq!(render_symbol(0xc3), "\\xc3");
    }

    #[test]
    fn test_record_display_is_tab_separated() {
        let record = CodeRecord {
            symbol: b'A',
            frequency: 5,
            code: "0".into(),
        };
        assert_eq!(record.to_string(), "A\t5\t0");
    }
}
