/// Whitespace trimming applied to submitted input before it is filtered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrimPolicy {
    /// Strip leading whitespace, newlines included.
    pub left: bool,
    /// Strip trailing whitespace, newlines included.
    pub right: bool,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
        }
    }
}

impl TrimPolicy {
    pub fn apply<'a>(&self, input: &'a str) -> &'a str {
        let input = if self.left { input.trim_start() } else { input };
        if self.right { input.trim_end() } else { input }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_both_sides_by_default() {
        assert_eq!(TrimPolicy::default().apply("  ls -la\n"), "ls -la");
        assert_eq!(TrimPolicy::default().apply("\n\t echo hi \r\n"), "echo hi");
    }

    #[test]
    fn test_single_side() {
        let left = TrimPolicy { left: true, right: false };
        let right = TrimPolicy { left: false, right: true };

        assert_eq!(left.apply("  ls  "), "ls  ");
        assert_eq!(right.apply("  ls  "), "  ls");
    }

    #[test]
    fn test_disabled_keeps_input() {
        let none = TrimPolicy { left: false, right: false };
        assert_eq!(none.apply(" ls\n"), " ls\n");
    }

    #[test]
    fn test_inner_whitespace_untouched() {
        assert_eq!(TrimPolicy::default().apply(" a  b\nc "), "a  b\nc");
    }
}
