//! SI prefixes accepted as number suffixes.
//!
//! `5k` reads as `5*(1E3)`. `da` is the only two-letter prefix and wins over
//! `d` when both match.

/// A single SI prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiPrefix {
    pub symbol: &'static str,
    pub name: &'static str,
    pub exponent: i32,
}

impl SiPrefix {
    /// Lexeme of the synthetic multiplier, e.g. `1E3` or `1E-6`.
    pub fn multiplier_lexeme(&self) -> String {
        format!("1E{}", self.exponent)
    }

    /// The multiplier value, parsed from its lexeme so it is the nearest
    /// double to the exact power of ten.
    pub fn multiplier(&self) -> f64 {
        self.multiplier_lexeme()
            .parse()
            .unwrap_or_else(|_| 10f64.powi(self.exponent))
    }
}

pub static SI_PREFIXES: [SiPrefix; 20] = [
    SiPrefix { symbol: "Y", name: "yotta", exponent: 24 },
    SiPrefix { symbol: "Z", name: "zetta", exponent: 21 },
    SiPrefix { symbol: "E", name: "exa", exponent: 18 },
    SiPrefix { symbol: "P", name: "peta", exponent: 15 },
    SiPrefix { symbol: "T", name: "tera", exponent: 12 },
    SiPrefix { symbol: "G", name: "giga", exponent: 9 },
    SiPrefix { symbol: "M", name: "mega", exponent: 6 },
    SiPrefix { symbol: "k", name: "kilo", exponent: 3 },
    SiPrefix { symbol: "h", name: "hecto", exponent: 2 },
    SiPrefix { symbol: "da", name: "deca", exponent: 1 },
    SiPrefix { symbol: "d", name: "deci", exponent: -1 },
    SiPrefix { symbol: "c", name: "centi", exponent: -2 },
    SiPrefix { symbol: "m", name: "milli", exponent: -3 },
    SiPrefix { symbol: "u", name: "micro", exponent: -6 },
    SiPrefix { symbol: "n", name: "nano", exponent: -9 },
    SiPrefix { symbol: "p", name: "pico", exponent: -12 },
    SiPrefix { symbol: "f", name: "femto", exponent: -15 },
    SiPrefix { symbol: "a", name: "atto", exponent: -18 },
    SiPrefix { symbol: "z", name: "zepto", exponent: -21 },
    SiPrefix { symbol: "y", name: "yocto", exponent: -24 },
];

pub fn lookup(symbol: &str) -> Option<&'static SiPrefix> {
    SI_PREFIXES.iter().find(|prefix| prefix.symbol == symbol)
}

/// Splits a suffixed literal such as `2.5da` into `("2.5", prefix)`.
pub fn split_suffix(lexeme: &str) -> Option<(&str, &'static SiPrefix)> {
    if let Some(mantissa) = lexeme.strip_suffix("da") {
        return lookup("da").map(|prefix| (mantissa, prefix));
    }
    let last = lexeme.char_indices().last()?;
    let (mantissa, suffix) = lexeme.split_at(last.0);
    lookup(suffix).map(|prefix| (mantissa, prefix))
}
