/// Charset initial : les dix chiffres.
pub const CHARSET_DEFAULT: &str = "0123456789";

/// Premier caractère ASCII imprimable (espace, 32).
pub const PRINTABLE_FIRST: char = ' ';

/// Dernier caractère ASCII imprimable (`~`, 126).
pub const PRINTABLE_LAST: char = '~';

/// Sélection de caractères pour `add` / `remove`.
///
/// # Example
/// ```
/// use ta_core::charset::CharSelection;
/// let sel = CharSelection::parse("z-a").unwrap();
/// assert_eq!(sel.chars().len(), 26);
/// assert_eq!(sel.chars()[0], 'a');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharSelection {
    /// Un seul caractère, quel qu'il soit.
    Single(char),
    /// Tout l'ASCII imprimable, 32..=126.
    All,
    /// Le caractère espace.
    Space,
    /// Plage `X-Y`, bornes dans l'ordre écrit par l'utilisateur.
    Range(char, char),
}

impl CharSelection {
    /// Parse the argument of an `add`/`remove` command.
    ///
    /// A one-character argument is always taken literally, so `"a"` and `" "`
    /// are singles while `"all"` and `"space"` are keywords (case-insensitive).
    /// Range endpoints must be word characters (`[A-Za-z0-9_]`).
    ///
    /// # Example
    /// ```
    /// use ta_core::charset::CharSelection;
    /// assert_eq!(CharSelection::parse("#"), Some(CharSelection::Single('#')));
    /// assert_eq!(CharSelection::parse("ALL"), Some(CharSelection::All));
    /// assert_eq!(CharSelection::parse("a-f"), Some(CharSelection::Range('a', 'f')));
    /// assert_eq!(CharSelection::parse("!-/"), None);
    /// assert_eq!(CharSelection::parse("ab"), None);
    /// ```
    #[must_use]
    pub fn parse(arg: &str) -> Option<Self> {
        let chars: Vec<char> = arg.chars().collect();
        match chars.as_slice() {
            [c] => Some(Self::Single(*c)),
            _ if arg.eq_ignore_ascii_case("all") => Some(Self::All),
            _ if arg.eq_ignore_ascii_case("space") => Some(Self::Space),
            [a, '-', b] if is_word_char(*a) && is_word_char(*b) => Some(Self::Range(*a, *b)),
            _ => None,
        }
    }

    /// Characters covered by the selection, ascending.
    ///
    /// Ranges are inclusive on both ends whatever order the endpoints were
    /// written in.
    #[must_use]
    pub fn chars(&self) -> Vec<char> {
        match *self {
            Self::Single(c) => vec![c],
            Self::All => (PRINTABLE_FIRST..=PRINTABLE_LAST).collect(),
            Self::Space => vec![' '],
            Self::Range(a, b) => (a.min(b)..=a.max(b)).collect(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
