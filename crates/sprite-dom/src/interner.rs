//! String Interner - Deduplicate strings to save memory
//!
//! Tag names ("svg", "path", "g") and attribute names ("id", "viewBox",
//! "d") repeat in every symbol of a sprite sheet, so they are stored once
//! and referenced by ID.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// String interner for deduplicating strings
#[derive(Debug)]
pub struct StringInterner {
    /// Interned strings, indexed by ID
    strings: Vec<Box<str>>,
    /// Map from string content to index
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create a new string interner with common SVG strings pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(128),
            map: HashMap::with_capacity(128),
        };

        // Pre-intern empty string at index 0
        interner.intern("");

        const COMMON_TAGS: &[&str] = &[
            "html", "head", "body", "svg", "symbol", "use", "defs", "g",
            "path", "circle", "rect", "line", "polyline", "polygon", "ellipse",
            "title", "desc", "text", "linearGradient", "radialGradient", "stop",
        ];

        const COMMON_ATTRS: &[&str] = &[
            "id", "class", "style", "href", "viewBox", "d", "fill", "stroke",
            "stroke-width", "width", "height", "x", "y", "cx", "cy", "r",
            "transform", "points",
        ];

        for tag in COMMON_TAGS {
            interner.intern(tag);
        }
        for attr in COMMON_ATTRS {
            interner.intern(attr);
        }

        interner
    }

    /// Intern a string, returning its ID
    /// If the string is already interned, returns the existing ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }

        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);

        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Get the string for an interned ID
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Approximate heap usage in bytes
    pub fn memory_usage(&self) -> usize {
        let text: usize = self.strings.iter().map(|s| s.len()).sum();
        // Each string is held twice: once in the vector and once as a map key
        text * 2
            + self.strings.capacity() * std::mem::size_of::<Box<str>>()
            + self.map.capacity() * (std::mem::size_of::<Box<str>>() + std::mem::size_of::<u32>())
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
