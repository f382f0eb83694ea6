//! Cause rendering utilities.

use core::fmt::Display;

use crate::types::{Cause, Defect};

/// How two causes were combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    Sequential,
    Parallel,
}

/// Trait for customizing how a [`Cause`] is turned into text.
///
/// The provided `format_cause` renders on a single line, wrapping a nested
/// composition in parentheses when it differs from its parent's.
pub trait CauseFormatter {
    fn format_fail(&self, error: &dyn Display) -> String {
        error.to_string()
    }

    fn format_die(&self, defect: &Defect) -> String {
        format!("defect: {}", defect)
    }

    fn format_interrupt(&self) -> String {
        "interrupted".into()
    }

    fn format_empty(&self) -> String {
        "empty".into()
    }

    fn separator(&self, composition: Composition) -> &str {
        match composition {
            Composition::Sequential => " -> ",
            Composition::Parallel => " | ",
        }
    }

    fn format_cause<E: Display>(&self, cause: &Cause<E>) -> String {
        let mut out = String::new();
        write_inline(self, cause, &mut out);
        out
    }
}

fn format_leaf<F, E>(formatter: &F, leaf: &Cause<E>) -> String
where
    F: CauseFormatter + ?Sized,
    E: Display,
{
    match leaf {
        Cause::Empty => formatter.format_empty(),
        Cause::Fail { error } => formatter.format_fail(error),
        Cause::Interrupt => formatter.format_interrupt(),
        Cause::Die { defect } => formatter.format_die(defect),
        Cause::Sequential { .. } | Cause::Parallel { .. } => String::new(),
    }
}

enum Inline<'a, E> {
    Cause(&'a Cause<E>, Option<Composition>),
    Separator(Composition),
    Close,
}

fn write_inline<F, E>(formatter: &F, cause: &Cause<E>, out: &mut String)
where
    F: CauseFormatter + ?Sized,
    E: Display,
{
    let mut pending = vec![Inline::Cause(cause, None)];
    while let Some(step) = pending.pop() {
        let (node, parent) = match step {
            Inline::Cause(node, parent) => (node, parent),
            Inline::Separator(composition) => {
                out.push_str(formatter.separator(composition));
                continue;
            },
            Inline::Close => {
                out.push(')');
                continue;
            },
        };

        let (composition, left, right) = match node {
            Cause::Sequential { left, right } => (Composition::Sequential, &**left, &**right),
            Cause::Parallel { left, right } => (Composition::Parallel, &**left, &**right),
            leaf => {
                out.push_str(&format_leaf(formatter, leaf));
                continue;
            },
        };

        // Nested compositions of another kind are parenthesized.
        if parent.is_some_and(|p| p != composition) {
            out.push('(');
            pending.push(Inline::Close);
        }
        pending.push(Inline::Cause(right, Some(composition)));
        pending.push(Inline::Separator(composition));
        pending.push(Inline::Cause(left, Some(composition)));
    }
}

/// Configuration-based cause formatter.
///
/// # Examples
///
/// ```
/// use outcome_rail::{Cause, CauseFormatConfig};
///
/// let cause = Cause::fail("not found").both(Cause::<&str>::die("boom"));
///
/// assert_eq!(cause.to_string(), "not found | defect: boom");
/// assert_eq!(
///     cause.render(&CauseFormatConfig::pretty()),
///     "Parallel\n├─ Fail: not found\n└─ Die: boom"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CauseFormatConfig {
    pub sequential_separator: String,
    pub parallel_separator: String,
    pub fail_prefix: Option<String>,
    pub die_prefix: Option<String>,
    pub interrupt_label: String,
    pub empty_label: String,
    pub multiline: bool,
}

impl Default for CauseFormatConfig {
    fn default() -> Self {
        Self {
            sequential_separator: " -> ".into(),
            parallel_separator: " | ".into(),
            fail_prefix: None,
            die_prefix: Some("defect: ".into()),
            interrupt_label: "interrupted".into(),
            empty_label: "empty".into(),
            multiline: false,
        }
    }
}

impl CauseFormatConfig {
    /// Every leaf carries its kind: `Fail: ..`, `Die: ..`, `Interrupt`.
    #[inline]
    pub fn labeled() -> Self {
        Self {
            fail_prefix: Some("Fail: ".into()),
            die_prefix: Some("Die: ".into()),
            interrupt_label: "Interrupt".into(),
            empty_label: "Empty".into(),
            ..Default::default()
        }
    }

    /// Labeled leaves laid out as a tree, one node per line.
    #[inline]
    pub fn pretty() -> Self {
        Self { multiline: true, ..Self::labeled() }
    }

    #[inline]
    pub fn compact() -> Self {
        Self {
            sequential_separator: ";".into(),
            parallel_separator: ",".into(),
            die_prefix: Some("!".into()),
            interrupt_label: "^".into(),
            ..Default::default()
        }
    }

    fn write_tree<E: Display>(&self, cause: &Cause<E>, out: &mut String) {
        // (node, text before it, indent of its children)
        let mut pending = vec![(cause, String::new(), String::new())];
        while let Some((node, lead, indent)) = pending.pop() {
            out.push_str(&lead);
            let (label, left, right) = match node {
                Cause::Sequential { left, right } => ("Sequential", &**left, &**right),
                Cause::Parallel { left, right } => ("Parallel", &**left, &**right),
                leaf => {
                    out.push_str(&format_leaf(self, leaf));
                    continue;
                },
            };

            out.push_str(label);
            pending.push((right, format!("\n{}└─ ", indent), format!("{}   ", indent)));
            pending.push((left, format!("\n{}├─ ", indent), format!("{}│  ", indent)));
        }
    }
}

impl CauseFormatter for CauseFormatConfig {
    fn format_fail(&self, error: &dyn Display) -> String {
        match &self.fail_prefix {
            Some(prefix) => format!("{}{}", prefix, error),
            None => error.to_string(),
        }
    }

    fn format_die(&self, defect: &Defect) -> String {
        match &self.die_prefix {
            Some(prefix) => format!("{}{}", prefix, defect),
            None => defect.to_string(),
        }
    }

    fn format_interrupt(&self) -> String {
        self.interrupt_label.clone()
    }

    fn format_empty(&self) -> String {
        self.empty_label.clone()
    }

    fn separator(&self, composition: Composition) -> &str {
        match composition {
            Composition::Sequential => &self.sequential_separator,
            Composition::Parallel => &self.parallel_separator,
        }
    }

    fn format_cause<E: Display>(&self, cause: &Cause<E>) -> String {
        let mut out = String::new();
        if self.multiline {
            self.write_tree(cause, &mut out);
        } else {
            write_inline(self, cause, &mut out);
        }
        out
    }
}
