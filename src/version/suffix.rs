//! Suffix run (`_alpha`, `_beta`, `_pre`, `_rc`, `_p`) and `-rN` revision

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::VersionError;
use crate::version::number::VersionNumber;

static SUFFIX_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_(alpha|beta|pre|rc|p)([0-9]*)").expect("valid regex"));

static REVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-r([0-9]+)$").expect("valid regex"));

/// Kind of a suffix token, declared oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SuffixKind {
    Alpha,
    Beta,
    Pre,
    Rc,
    P,
}

impl SuffixKind {
    pub const ALL: [SuffixKind; 5] = [
        SuffixKind::Alpha,
        SuffixKind::Beta,
        SuffixKind::Pre,
        SuffixKind::Rc,
        SuffixKind::P,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuffixKind::Alpha => "alpha",
            SuffixKind::Beta => "beta",
            SuffixKind::Pre => "pre",
            SuffixKind::Rc => "rc",
            SuffixKind::P => "p",
        }
    }

    /// Position in the suffix order. Rank 4 is reserved for "no suffix",
    /// which sorts after every pre-release kind and before `_p`.
    fn rank(&self) -> u8 {
        match self {
            SuffixKind::Alpha => 0,
            SuffixKind::Beta => 1,
            SuffixKind::Pre => 2,
            SuffixKind::Rc => 3,
            SuffixKind::P => 5,
        }
    }
}

impl std::str::FromStr for SuffixKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SuffixKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

const NO_SUFFIX_RANK: u8 = 4;

/// One `_name[N]` token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuffixToken {
    pub kind: SuffixKind,
    pub ordinal: VersionNumber,
}

impl SuffixToken {
    /// Only a missing token carries the "no suffix" rank, so its ordinal is never compared
    fn sort_key(token: Option<&SuffixToken>) -> (u8, Option<&VersionNumber>) {
        match token {
            Some(token) => (token.kind.rank(), Some(&token.ordinal)),
            None => (NO_SUFFIX_RANK, None),
        }
    }
}

/// Suffix tokens in order of appearance plus the package revision
#[derive(Debug, Clone, Default)]
pub struct VersionSuffix {
    tokens: Vec<SuffixToken>,
    revision: VersionNumber,
}

impl VersionSuffix {
    /// Parse the text following the plain version, e.g. `_pre4_p1-r2`.
    ///
    /// An empty string yields no tokens and revision 0.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let mut tokens = Vec::new();
        let mut rest = text;

        while let Some(caps) = SUFFIX_TOKEN.captures(rest) {
            let kind = caps[1]
                .parse::<SuffixKind>()
                .map_err(|_| VersionError::malformed(text, "unknown suffix"))?;
            let ordinal = VersionNumber::from_digits(&caps[2]);
            tokens.push(SuffixToken { kind, ordinal });
            rest = &rest[caps[0].len()..];
        }

        let revision = if rest.is_empty() {
            VersionNumber::default()
        } else if let Some(caps) = REVISION.captures(rest) {
            VersionNumber::from_digits(&caps[1])
        } else {
            return Err(VersionError::malformed(
                text,
                format!("unexpected trailing text '{}'", rest),
            ));
        };

        Ok(Self { tokens, revision })
    }

    pub fn tokens(&self) -> &[SuffixToken] {
        &self.tokens
    }

    pub fn revision(&self) -> &VersionNumber {
        &self.revision
    }

    /// Compare the suffix runs only, ignoring the revision
    pub fn cmp_tokens(&self, other: &Self) -> Ordering {
        let len = self.tokens.len().max(other.tokens.len());
        for i in 0..len {
            let lhs = SuffixToken::sort_key(self.tokens.get(i));
            let rhs = SuffixToken::sort_key(other.tokens.get(i));
            match lhs.cmp(&rhs) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }
}

impl Ord for VersionSuffix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_tokens(other)
            .then_with(|| self.revision.cmp(&other.revision))
    }
}

impl PartialOrd for VersionSuffix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionSuffix {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionSuffix {}
