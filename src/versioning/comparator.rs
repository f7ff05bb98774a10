//! Lowering of single range comparators onto `semver::VersionReq` syntax.

const OPERATORS: [&str; 8] = [">=", "<=", "~>", ">", "<", "=", "~", "^"];

/// Result of lowering one comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lowered {
    /// Matches every release version (`*`, `x`, `>=*`).
    Any,
    /// Matches no version at all (`>*`, `<x`).
    Nothing,
    /// A comparator in `semver` crate syntax, e.g. `>=1.2`.
    Comparator(String),
}

/// A version with optional trailing components, e.g. `1`, `1.2`, `1.x.x`.
///
/// Components after the first wildcard are dropped.
#[derive(Debug, PartialEq, Eq)]
struct PartialVersion<'a> {
    numbers: Vec<&'a str>,
    pre: Option<&'a str>,
}

impl<'a> PartialVersion<'a> {
    fn parse(input: &'a str) -> Option<Self> {
        // At most one `=` and one `v`, as in `=v1.2.3`.
        let input = input.strip_prefix('=').unwrap_or(input);
        let input = input.strip_prefix('v').unwrap_or(input);
        // Build metadata never takes part in matching.
        let input = input.split('+').next().unwrap_or_default();

        let (core, pre) = match input.find('-') {
            Some(idx) => (&input[..idx], Some(&input[idx + 1..])),
            None => (input, None),
        };

        let components: Vec<&str> = core.split('.').collect();
        if components.len() > 3 {
            return None;
        }

        let mut numbers = Vec::with_capacity(3);
        let mut wildcard = false;
        for component in &components {
            if is_wildcard(component) {
                wildcard = true;
            } else if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            } else if !wildcard {
                numbers.push(*component);
            }
        }

        match pre {
            Some(tag) if tag.is_empty() || numbers.len() != 3 => None,
            _ => Some(Self { numbers, pre }),
        }
    }

    fn render(&self) -> Option<String> {
        if self.numbers.is_empty() {
            return None;
        }
        let mut out = self.numbers.join(".");
        if let Some(pre) = self.pre {
            out.push('-');
            out.push_str(pre);
        }
        Some(out)
    }
}

fn is_wildcard(component: &str) -> bool {
    matches!(component, "x" | "X" | "*")
}

/// Returns true if the token is made only of operator characters (`>=`, `^`).
pub(crate) fn is_operator(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^'))
}

fn split_operator(token: &str) -> (&str, &str) {
    OPERATORS
        .iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (*op, rest)))
        .unwrap_or(("", token))
}

/// Lower a comparator such as `>=1.2`, `~1.2.x` or `1.x.x`.
///
/// Returns `None` if the token is not a valid comparator.
pub(crate) fn lower_comparator(token: &str) -> Option<Lowered> {
    let (op, rest) = split_operator(token);
    let version = PartialVersion::parse(rest)?;

    // A bare version is an exact match in range syntax.
    let op = match op {
        "" | "=" => "=",
        "~>" => "~",
        other => other,
    };

    Some(match version.render() {
        Some(v) => Lowered::Comparator(format!("{op}{v}")),
        None if op == ">" || op == "<" => Lowered::Nothing,
        None => Lowered::Any,
    })
}

/// Lower an inclusive hyphen range `from - to` into its two bounds.
pub(crate) fn lower_hyphen(from: &str, to: &str) -> Option<[Lowered; 2]> {
    let lower = PartialVersion::parse(from)?;
    let upper = PartialVersion::parse(to)?;

    let bound = |op: &str, v: &PartialVersion<'_>| match v.render() {
        Some(v) => Lowered::Comparator(format!("{op}{v}")),
        None => Lowered::Any,
    };

    Some([bound(">=", &lower), bound("<=", &upper)])
}
