//! Runtime-built filter pipelines over `f64` sequences.
//!
//! A [`Pipeline`] is a list of [`FilterExpr`]s plus one [`Terminal`]. Running
//! it composes every filter, in order, onto a single [`DynFilteredView`] and
//! then invokes the terminal once.

use crate::expr::{ExprError, FilterExpr, ReduceExpr, Terminal};
use crate::logging::debug;
#[cfg(feature = "logging")]
use crate::logging::warn;
use crate::predicate::Predicate;
use crate::view::{DynFilteredView, FilteredView};

/// Result of a reduce terminal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
#[cfg_attr(feature = "config", serde(untagged))]
pub enum Reduced {
    Number(f64),
    Count(usize),
    Text(String),
    /// `min`/`max` over an empty selection.
    Nothing,
}

/// Result of running a pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// Transformed accepted elements, in order.
    Mapped(Vec<f64>),
    Reduced(Reduced),
    /// Number of elements handed to the sink by an `each` terminal.
    Visited(usize),
}

impl ReduceExpr {
    /// Fold the accepted elements of `view`.
    pub fn reduce_view<P>(&self, view: &FilteredView<'_, f64, P>) -> Reduced
    where
        P: Predicate<f64> + ?Sized,
    {
        match self {
            Self::Sum => Reduced::Number(view.reduce(|acc: f64, x| acc + x, 0.0)),
            Self::Product => Reduced::Number(view.reduce(|acc: f64, x| acc * x, 1.0)),
            Self::Min => extreme(view, f64::min),
            Self::Max => extreme(view, f64::max),
            Self::Count => Reduced::Count(view.count()),
            Self::Concat => Reduced::Text(view.reduce(
                |mut acc: String, x| {
                    acc.push_str(&x.to_string());
                    acc
                },
                String::new(),
            )),
        }
    }
}

fn extreme<P>(view: &FilteredView<'_, f64, P>, pick: fn(f64, f64) -> f64) -> Reduced
where
    P: Predicate<f64> + ?Sized,
{
    view.reduce(|acc: Option<f64>, x| Some(acc.map_or(*x, |a| pick(a, *x))), None)
        .map_or(Reduced::Nothing, Reduced::Number)
}

/// An ordered list of filters ending in one terminal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    filters: Vec<FilterExpr>,
    terminal: Terminal,
}

impl Pipeline {
    /// Create a pipeline with no filters.
    pub fn new(terminal: Terminal) -> Self {
        Self {
            filters: Vec::new(),
            terminal,
        }
    }

    /// Parse filters and terminal from their textual forms.
    pub fn parse<S: AsRef<str>>(filters: &[S], terminal: &str) -> Result<Self, ExprError> {
        let filters = filters
            .iter()
            .map(|f| f.as_ref().parse())
            .collect::<Result<Vec<FilterExpr>, _>>()?;
        let terminal = terminal.parse()?;
        debug!(filters = filters.len(), terminal = %terminal, "parsed pipeline");
        Ok(Self { filters, terminal })
    }

    /// Append a filter.
    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.filters.push(expr);
        self
    }

    pub fn filters(&self) -> &[FilterExpr] {
        &self.filters
    }

    pub fn terminal(&self) -> Terminal {
        self.terminal
    }

    /// Compose every filter onto a view over `items`, without evaluating any.
    pub fn view<'a>(&self, items: &'a [f64]) -> DynFilteredView<'a, f64> {
        let mut view = crate::unfiltered(items).into_dyn();
        for &expr in &self.filters {
            view = view.with_filter(move |x: &f64| expr.matches(*x)).into_dyn();
        }
        view
    }

    /// Run the pipeline over `items`.
    ///
    /// For an `each` terminal, every accepted element is passed to `sink` in
    /// order; other terminals never call `sink`.
    pub fn run<F>(&self, items: &[f64], mut sink: F) -> Outcome
    where
        F: FnMut(f64),
    {
        #[cfg(feature = "logging")]
        if items.iter().any(|x| x.is_nan()) {
            warn!("input contains NaN; comparison filters will reject it");
        }

        let view = self.view(items);
        let outcome = match self.terminal {
            Terminal::Map(expr) => Outcome::Mapped(view.map(|x| expr.apply(*x))),
            Terminal::Reduce(expr) => Outcome::Reduced(expr.reduce_view(&view)),
            Terminal::Each => {
                let mut visited = 0;
                view.for_each(|x| {
                    visited += 1;
                    sink(*x);
                });
                Outcome::Visited(visited)
            }
        };
        debug!(len = items.len(), terminal = %self.terminal, "pipeline finished");
        outcome
    }
}
