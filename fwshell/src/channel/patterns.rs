//! Signature registry for prompt, password and hint detection.
//!
//! Every signature is searched unanchored over the whole buffer accumulated
//! by the current operation. Buffers are bounded and short-lived, so the
//! search is simply repeated after every chunk.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

static REGISTRY: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::builtin);

/// The five canonical prompt classes, numbered as in the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptClass {
    /// GAiA CLISH, e.g. `gw-01> `
    Clish,
    /// Expert / SPLAT shell, e.g. `[Expert@gw-01:0]# `
    Expert,
    /// CrossBeam CPM, e.g. `cbs-1# `
    Cpm,
    /// IPSO: an Expert-shaped prompt seen after the IPSO banner
    Ipso,
    /// CrossBeam APM, e.g. `[admin@cbs-1] ~$ `
    Apm,
}

impl PromptClass {
    /// Every class, in recognition order.
    pub const ALL: [PromptClass; 5] = [
        PromptClass::Clish,
        PromptClass::Expert,
        PromptClass::Cpm,
        PromptClass::Ipso,
        PromptClass::Apm,
    ];

    /// 1-based index used by the classification table.
    pub fn index(self) -> usize {
        match self {
            PromptClass::Clish => 1,
            PromptClass::Expert => 2,
            PromptClass::Cpm => 3,
            PromptClass::Ipso => 4,
            PromptClass::Apm => 5,
        }
    }
}

/// Non-terminating signals observed while waiting for a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    /// `Terminal type?` query, answered with `vt220`
    TerminalType,
    /// SPLAT cpshell banner (`? for list of commands`)
    CpShellBanner,
    /// CrossBeam login banner (`Active Alarms Summary`)
    CrossbeamBanner,
    /// IPSO banner
    IpsoBanner,
}

impl Hint {
    /// Whether seeing this hint discards the text read so far.
    pub fn resets_buffer(self) -> bool {
        matches!(self, Hint::TerminalType | Hint::IpsoBanner)
    }
}

/// Anything the registry can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    Prompt(PromptClass),
    PasswordChallenge,
    Hint(Hint),
}

/// Flags recorded from hints during a handshake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintFlags {
    pub splat: bool,
    pub splat_cpshell: bool,
    pub ipso: bool,
    pub xbm: bool,
}

impl HintFlags {
    /// Record a hint. Terminal-type queries carry no flag.
    pub fn record(&mut self, hint: Hint) {
        match hint {
            Hint::CpShellBanner => {
                self.splat = true;
                self.splat_cpshell = true;
            }
            Hint::CrossbeamBanner => self.xbm = true,
            Hint::IpsoBanner => self.ipso = true,
            Hint::TerminalType => {}
        }
    }

    /// Map a raw prompt match onto its canonical class. An Expert-shaped
    /// prompt after the IPSO banner is an IPSO prompt.
    pub fn refine(&self, class: PromptClass) -> PromptClass {
        match class {
            PromptClass::Expert if self.ipso => PromptClass::Ipso,
            other => other,
        }
    }
}

/// Process-wide, read-only set of recognized signatures.
#[derive(Debug)]
pub struct PatternRegistry {
    clish: Regex,
    expert: Regex,
    cpm: Regex,
    apm: Regex,
    password: Regex,
    hints: Vec<(Hint, Regex)>,
}

impl PatternRegistry {
    /// Get the global registry.
    pub fn global() -> &'static PatternRegistry {
        &REGISTRY
    }

    fn builtin() -> Self {
        Self {
            clish: Regex::new(r"\w> ").unwrap(),
            expert: Regex::new(r"\w\]# ").unwrap(),
            cpm: Regex::new(r"\w# ").unwrap(),
            apm: Regex::new(r"\w\] ~\$ ").unwrap(),
            password: Regex::new(r"(?i)password:").unwrap(),
            hints: vec![
                (Hint::TerminalType, Regex::new(r"Terminal type\?").unwrap()),
                (
                    Hint::CpShellBanner,
                    Regex::new(r"\? for list of commands").unwrap(),
                ),
                (
                    Hint::CrossbeamBanner,
                    Regex::new(r"Active Alarms Summary").unwrap(),
                ),
                (Hint::IpsoBanner, Regex::new(r"IPSO ").unwrap()),
            ],
        }
    }

    fn prompt_regex(&self, class: PromptClass) -> &Regex {
        match class {
            PromptClass::Clish => &self.clish,
            PromptClass::Expert | PromptClass::Ipso => &self.expert,
            PromptClass::Cpm => &self.cpm,
            PromptClass::Apm => &self.apm,
        }
    }

    /// Find the first prompt class (in recognition order) present in `data`.
    ///
    /// Only raw shapes are reported: an Expert-shaped prompt is always
    /// `Expert` here, see [`HintFlags::refine`].
    pub fn find_prompt(&self, data: &[u8]) -> Option<PromptClass> {
        self.find_prompt_among(data, &PromptClass::ALL)
    }

    /// Like [`find_prompt`](Self::find_prompt), restricted to `allowed`.
    pub fn find_prompt_among(&self, data: &[u8], allowed: &[PromptClass]) -> Option<PromptClass> {
        self.locate_prompt(data, allowed).map(|(class, _)| class)
    }

    /// Like [`find_prompt_among`](Self::find_prompt_among), also returning
    /// the offset just past the last match of that class in `data`.
    pub fn locate_prompt(
        &self,
        data: &[u8],
        allowed: &[PromptClass],
    ) -> Option<(PromptClass, usize)> {
        let last_end = |re: &Regex| re.find_iter(data).last().map(|m| m.end());

        PromptClass::ALL
            .into_iter()
            .filter(|c| *c != PromptClass::Ipso && allowed.contains(c))
            .find_map(|c| last_end(self.prompt_regex(c)).map(|end| (c, end)))
            .or_else(|| {
                // Ipso alone still matches its Expert-shaped prompt
                if allowed.contains(&PromptClass::Ipso) {
                    last_end(&self.expert).map(|end| (PromptClass::Ipso, end))
                } else {
                    None
                }
            })
    }

    /// Whether `data` contains a password challenge.
    pub fn is_password_challenge(&self, data: &[u8]) -> bool {
        self.password.is_match(data)
    }

    /// Every hint present in `data`, in registry order.
    pub fn hints<'a>(&'a self, data: &'a [u8]) -> impl Iterator<Item = Hint> + 'a {
        self.hints
            .iter()
            .filter(move |(_, re)| re.is_match(data))
            .map(|(hint, _)| *hint)
    }

    /// Recognize the highest-precedence signature in `data`: prompts first,
    /// then the password challenge, then hints.
    pub fn recognize(&self, data: &[u8]) -> Option<Signature> {
        if let Some(class) = self.find_prompt(data) {
            return Some(Signature::Prompt(class));
        }
        if self.is_password_challenge(data) {
            return Some(Signature::PasswordChallenge);
        }
        self.hints(data).next().map(Signature::Hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static PatternRegistry {
        PatternRegistry::global()
    }

    #[test]
    fn test_prompt_shapes() {
        assert_eq!(registry().find_prompt(b"gw-01> "), Some(PromptClass::Clish));
        assert_eq!(
            registry().find_prompt(b"[Expert@gw-01:0]# "),
            Some(PromptClass::Expert)
        );
        assert_eq!(registry().find_prompt(b"cbs-1# "), Some(PromptClass::Cpm));
        assert_eq!(
            registry().find_prompt(b"[admin@cbs-1] ~$ "),
            Some(PromptClass::Apm)
        );
        assert_eq!(registry().find_prompt(b"Last login: today\r\n"), None);
    }

    #[test]
    fn test_prompt_search_is_unanchored() {
        let data = b"banner\r\n[Expert@gw:0]# trailing";
        assert_eq!(registry().find_prompt(data), Some(PromptClass::Expert));
    }

    #[test]
    fn test_prompt_needs_trailing_space() {
        assert_eq!(registry().find_prompt(b"gw-01>"), None);
    }

    #[test]
    fn test_locate_prompt_uses_last_match() {
        let data = b"motd: try gw> first\r\ngw-01> \r\n";
        let (class, end) = registry().locate_prompt(data, &PromptClass::ALL).unwrap();
        assert_eq!(class, PromptClass::Clish);
        assert_eq!(&data[..end], b"motd: try gw> first\r\ngw-01> ");
    }

    #[test]
    fn test_restricted_search() {
        let data = b"[Expert@gw:0]# ";
        assert_eq!(
            registry().find_prompt_among(data, &[PromptClass::Apm]),
            None
        );
        assert_eq!(
            registry().find_prompt_among(data, &[PromptClass::Ipso]),
            Some(PromptClass::Ipso)
        );
    }

    #[test]
    fn test_password_challenge() {
        assert!(registry().is_password_challenge(b"Enter expert password:"));
        assert!(registry().is_password_challenge(b"Password: "));
        assert!(!registry().is_password_challenge(b"expert"));
    }

    #[test]
    fn test_hints_collects_all() {
        let data = b"IPSO (c) 2009\r\nTerminal type? [vt100] ";
        let hints: Vec<_> = registry().hints(data).collect();
        assert_eq!(hints, vec![Hint::TerminalType, Hint::IpsoBanner]);
    }

    #[test]
    fn test_recognize_precedence() {
        // A prompt wins over a hint in the same buffer
        let data = b"Type ? for list of commands\r\n[gw]# ";
        assert_eq!(
            registry().recognize(data),
            Some(Signature::Prompt(PromptClass::Expert))
        );
        assert_eq!(
            registry().recognize(b"Active Alarms Summary\r\n"),
            Some(Signature::Hint(Hint::CrossbeamBanner))
        );
        assert_eq!(
            registry().recognize(b" expert password:"),
            Some(Signature::PasswordChallenge)
        );
    }

    #[test]
    fn test_hint_flags_refine() {
        let mut flags = HintFlags::default();
        assert_eq!(flags.refine(PromptClass::Expert), PromptClass::Expert);

        flags.record(Hint::IpsoBanner);
        assert_eq!(flags.refine(PromptClass::Expert), PromptClass::Ipso);
        assert_eq!(flags.refine(PromptClass::Clish), PromptClass::Clish);

        flags.record(Hint::CpShellBanner);
        assert!(flags.splat && flags.splat_cpshell);
    }
}
