//! Terminal detection for command output

use std::io::IsTerminal;

/// Environment variables that mark a CI run
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "JENKINS_URL",
    "TF_BUILD",
];

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// cliclack decorations, prompts allowed
    Terminal,
    /// Tagged plain lines, never prompts (pipes, CI, tests)
    Plain,
}

impl OutputMode {
    /// Terminal only when stdin and stdout are ttys outside CI
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let ci = CI_VARS.iter().any(|var| std::env::var_os(var).is_some());
        Self::resolve(tty, ci)
    }

    fn resolve(tty: bool, ci: bool) -> Self {
        if tty && !ci {
            Self::Terminal
        } else {
            Self::Plain
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Terminal
    }
}
