use std::collections::HashSet;

/// Leading tag that marks a generated record type.
pub const TYPE_PREFIX: char = 'T';

/// Upper-case the first character, lower-case the rest (`userName` → `Username`).
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Candidate record name for an object found under `key`.
pub fn record_name(key: &str) -> String {
    format!("{TYPE_PREFIX}{}", capitalize(key))
}

/// Record names handed out so far.
///
/// Apex identifiers are case-insensitive, so `TFoo` and `Tfoo` collide.
#[derive(Debug, Default)]
pub struct NameTable {
    taken: HashSet<String>,
}

impl NameTable {
    pub fn new() -> Self { Self::default() }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(&name.to_lowercase())
    }

    /// Claim `name` as-is. Returns false if it was already taken.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.taken.insert(name.to_lowercase())
    }

    /// Claim `base`, or the first free `base2`, `base3`, ….
    pub fn allocate(&mut self, base: &str) -> String {
        if self.reserve(base) {
            return base.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}{n}");
            if self.reserve(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
