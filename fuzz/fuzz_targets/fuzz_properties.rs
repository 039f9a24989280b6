#![no_main]
use libfuzzer_sys::fuzz_target;
use propstream::{CharSource, Entries, Entry, PropertyMap, Result, WriteOptions, parse_str};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const HEADER: usize = 5; // 1 flag byte + 4-byte chunking seed

/// A source that trickles text out in pseudo-random fill sizes derived
/// from a fixed seed, so every run is reproducible from its input bytes.
struct ChunkedSource {
    chars: Vec<char>,
    pos: usize,
    rng: SmallRng,
}

impl CharSource for ChunkedSource {
    fn fill(&mut self, buf: &mut [char]) -> Result<usize> {
        let remaining = self.chars.len() - self.pos;
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let n = self
            .rng
            .random_range(1..=remaining)
            .min(buf.len());
        buf[..n].copy_from_slice(&self.chars[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn outcomes<S: CharSource>(entries: Entries<S>) -> Vec<std::result::Result<Entry, String>> {
    entries
        .map(|item| item.map_err(|err| err.to_string()))
        .collect()
}

fn run(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let chunk_seed = u64::from(u32::from_le_bytes(data[1..5].try_into().unwrap()));
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    // Chunking must never change what the parser produces.
    let whole = outcomes(parse_str(&text));
    let chunked = outcomes(Entries::new(ChunkedSource {
        chars: text.chars().collect(),
        pos: 0,
        rng: SmallRng::seed_from_u64(chunk_seed),
    }));
    assert_eq!(whole, chunked, "chunking changed the parse of {text:?}");

    // A parseable stream must survive a save/load round trip.
    if whole.iter().all(std::result::Result::is_ok) {
        let map = PropertyMap::new();
        map.load_str(&text).expect("whole parse succeeded");

        let options = WriteOptions {
            escape_unicode: flags & 1 != 0,
        };
        let saved = map.to_text(Some("fuzz"), options);
        let reloaded = PropertyMap::new();
        reloaded
            .load_str(&saved)
            .expect("saved text must parse cleanly");

        let mut before = map.entries();
        let mut after = reloaded.entries();
        before.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        after.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        assert_eq!(before, after, "round trip changed the store for {text:?}");
    }
}

fuzz_target!(|data: &[u8]| run(data));
