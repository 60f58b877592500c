/// How a merchant rule compares against a lowercased, trimmed payee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Match {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Match {
    fn is_match(&self, canonical: &str) -> bool {
        match self {
            Match::Exact(s) => canonical == *s,
            Match::Prefix(s) => canonical.starts_with(s),
        }
    }
}

/// A shop common enough on this card to deserve a tidy payee name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Merchant {
    pub name: &'static str,
    pub patterns: &'static [Match],
}

impl Merchant {
    pub fn is_match(&self, payee: &str) -> bool {
        let canonical = payee.trim().to_lowercase();
        self.patterns.iter().any(|p| p.is_match(&canonical))
    }
}

pub const MERCHANTS: &[Merchant] = &[
    Merchant {
        name: "John Lewis",
        patterns: &[Match::Exact("www.johnlewis.com")],
    },
    Merchant {
        name: "Waitrose",
        patterns: &[Match::Prefix("waitrose")],
    },
    Merchant {
        name: "Amazon",
        patterns: &[
            Match::Prefix("amzn"),
            Match::Prefix("amazon"),
            Match::Prefix("kindle svcs"),
        ],
    },
];

/// First merchant whose patterns match the payee.
pub fn find(payee: &str) -> Option<&'static Merchant> {
    MERCHANTS.iter().find(|m| m.is_match(payee))
}
