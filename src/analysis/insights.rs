//! The "Mind Over Money" report: static insight templates filled in from an `Aggregation`.

use crate::analysis::Aggregation;
use crate::model::{Amount, Category};
use serde::Serialize;
use std::fmt::{Display, Formatter};

const AMOUNT: &str = "{amount}";
const PERCENT: &str = "{percent}";
const CURRENCY: &str = "{currency}";

const OVERALL_PERSONALITY: &str = "You're a time-poor, experience-loving spender who values \
convenience. With small tweaks, you can redirect habits into wealth-building.";

/// One row of the static insight table. The text fields may contain `{amount}`, `{percent}` and
/// `{currency}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightGroup {
    pub title: &'static str,
    /// The categories whose totals are combined for this insight.
    pub categories: &'static [&'static str],
    pub analysis: &'static str,
    pub psychology: &'static str,
    pub recommendation: &'static str,
}

pub const INSIGHT_GROUPS: &[InsightGroup] = &[
    InsightGroup {
        title: "🍕 Food Delivery Habit",
        categories: &["food"],
        analysis: "{amount} on food apps suggests convenience-first mindset. Could be time crunch \
            or habit.",
        psychology: "Using food as comfort or social currency? High frequency hints at emotional \
            or routine-based spending.",
        recommendation: "Try 2 home-cooked meals weekly. Save {currency}800+/month & discover new \
            recipes!",
    },
    InsightGroup {
        title: "🛍️ Impulse Shopping",
        categories: &["shopping"],
        analysis: "{amount} on shopping, possibly FOMO-driven or identity expression.",
        psychology: "Retail therapy releases dopamine. Are you celebrating wins or coping with \
            stress?",
        recommendation: "Use the 24-hour rule. Wait a day. 70% of urges fade by tomorrow.",
    },
    InsightGroup {
        title: "🎮 Experience Seeker",
        categories: &["gaming", "entertainment"],
        analysis: "You invest in experiences over things, great for mental health!",
        psychology: "Extroverted or experience-driven personality. Values memories, not material \
            goods.",
        recommendation: "Keep this spending healthy. Just cap it at 15% of income.",
    },
];

/// An insight card with its templates filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: String,
    pub percentage: u32,
    pub amount: Amount,
    pub analysis: String,
    pub psychology: String,
    pub recommendation: String,
}

/// One line of the "where it all went" breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub category: Category,
    pub icon: &'static str,
    pub label: String,
    pub amount: Amount,
    pub percentage: u32,
}

/// The complete spending report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub total_spent: Amount,
    pub top_category: Category,
    pub monthly_average: Amount,
    /// The number of distinct categories, shown as "spending zones".
    pub category_count: usize,
    pub insights: Vec<Insight>,
    pub overall_personality: String,
    /// Category totals sorted by amount, largest first.
    pub breakdown: Vec<BreakdownRow>,
    #[serde(skip)]
    currency_symbol: String,
}

/// Fills in the insight table from `aggregation`. Amounts are prefixed with `currency_symbol`.
pub fn analyze(aggregation: &Aggregation, currency_symbol: &str) -> Analysis {
    let total = aggregation.total_spent();

    let insights = INSIGHT_GROUPS
        .iter()
        .map(|group| {
            let amount: Amount = group
                .categories
                .iter()
                .filter_map(|c| aggregation.total_for(c))
                .sum();
            let percentage = amount.percent_of(total);
            let fill = |template: &str| {
                template
                    .replace(AMOUNT, &amount.with_symbol(currency_symbol))
                    .replace(PERCENT, &percentage.to_string())
                    .replace(CURRENCY, currency_symbol)
            };
            Insight {
                title: group.title.to_string(),
                percentage,
                amount,
                analysis: fill(group.analysis),
                psychology: fill(group.psychology),
                recommendation: fill(group.recommendation),
            }
        })
        .collect();

    let mut breakdown: Vec<BreakdownRow> = aggregation
        .per_category()
        .iter()
        .map(|t| BreakdownRow {
            category: t.category().clone(),
            icon: t.category().icon(),
            label: t.category().label(),
            amount: t.amount(),
            percentage: t.amount().percent_of(total),
        })
        .collect();
    // Stable, so equal amounts keep first-seen order.
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));

    Analysis {
        total_spent: total,
        top_category: aggregation.dominant_category().clone(),
        monthly_average: aggregation.monthly_average(),
        category_count: aggregation.per_category().len(),
        insights,
        overall_personality: OVERALL_PERSONALITY.to_string(),
        breakdown,
        currency_symbol: currency_symbol.to_string(),
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sym = self.currency_symbol.as_str();
        writeln!(f, "🧠 Your Money Mindset")?;
        writeln!(f, "{}", self.overall_personality)?;
        writeln!(
            f,
            "Total Spent: {} | Spending Zones: {} | Monthly Average: {}",
            self.total_spent.grouped_with_symbol(sym),
            self.category_count,
            self.monthly_average.grouped_with_symbol(sym),
        )?;
        for insight in &self.insights {
            writeln!(f)?;
            writeln!(f, "{} ({}%)", insight.title, insight.percentage)?;
            writeln!(f, "  📊 Spending Pattern: {}", insight.analysis)?;
            writeln!(f, "  🧠 Psychology: {}", insight.psychology)?;
            writeln!(f, "  💡 Fix This: {}", insight.recommendation)?;
        }
        writeln!(f)?;
        write!(f, "🗂️ Where It All Went")?;
        for row in &self.breakdown {
            write!(
                f,
                "\n  {} {:<16}{:>12}{:>5}%",
                row.icon,
                row.label,
                row.amount.grouped_with_symbol(sym),
                row.percentage
            )?;
        }
        Ok(())
    }
}
