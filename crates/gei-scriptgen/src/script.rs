//! Structured script assembly.

use std::fmt;

/// One emitted unit of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A fixed multi-line block, e.g. a helper function or validation check.
    Block(&'static str),
    /// A comment banner.
    Comment(String),
    /// A statement that runs part of a migration.
    Invocation(String),
    /// Any other statement.
    Statement(String),
    /// An empty line.
    Blank,
}

impl Fragment {
    /// Whether this fragment runs a downstream CLI command.
    pub fn is_invocation(&self) -> bool {
        matches!(self, Self::Invocation(_))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(text) => f.write_str(text),
            Self::Comment(text) | Self::Invocation(text) | Self::Statement(text) => {
                f.write_str(text)
            }
            Self::Blank => Ok(()),
        }
    }
}

/// An ordered list of fragments, each rendered on its own line(s).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuilder {
    fragments: Vec<Fragment>,
}

impl ScriptBuilder {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any fragment.
    pub fn push(&mut self, fragment: Fragment) -> &mut Self {
        self.fragments.push(fragment);
        self
    }

    /// Append a fixed block.
    pub fn block(&mut self, text: &'static str) -> &mut Self {
        self.push(Fragment::Block(text))
    }

    /// Append a `# ===... ===` banner.
    pub fn banner(&mut self, text: impl fmt::Display) -> &mut Self {
        self.push(Fragment::Comment(format!("# =========== {text} ===========")))
    }

    /// Append a comment line verbatim.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Fragment::Comment(text.into()))
    }

    /// Append a statement that runs a downstream command.
    pub fn invocation(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Fragment::Invocation(text.into()))
    }

    /// Append any other statement.
    pub fn statement(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Fragment::Statement(text.into()))
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.push(Fragment::Blank)
    }

    /// The fragments in emission order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The invocation statements in emission order.
    pub fn invocations(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Invocation(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Render the script, terminating every fragment with a newline.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScriptBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            writeln!(f, "{fragment}")?;
        }
        Ok(())
    }
}
