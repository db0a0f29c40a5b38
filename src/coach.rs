//! Spend Sensei, the canned money coach.
//!
//! Replies come from a fixed rule table: the first rule whose keyword appears anywhere in the
//! lowercased message wins, otherwise the default reply is used. `{currency}` in a reply is
//! replaced by the configured currency symbol.

/// A keyword and the reply it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub keyword: &'static str,
    pub reply: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        keyword: "budget",
        reply: "Nice! You spend ~{currency}1,400/week on food delivery. Try allocating \
            {currency}1,000 in a 'Food Fun' envelope. Saves {currency}200+/week! 🎯",
    },
    Rule {
        keyword: "save",
        reply: "🔥 Pro tip: Cook just 2 meals/week. That's {currency}800+ saved monthly. Invest \
            half. Future you will thank present you! 🌟",
    },
    Rule {
        keyword: "invest",
        reply: "🚀 Even {currency}500/month in SIP at 12% = {currency}90k in 10 years. Start \
            small. Consistency > size. Let's automate it!",
    },
];

const CURRENCY: &str = "{currency}";

pub const DEFAULT_REPLY: &str =
    "I'm here to help! Ask me about budgeting, saving, or your spending patterns. 💬";

/// Returns the coach's reply to `message` with amounts in `currency_symbol`, or `None` if the
/// message is blank.
pub fn reply(message: &str, currency_symbol: &str) -> Option<String> {
    if message.trim().is_empty() {
        return None;
    }
    let lower = message.to_lowercase();
    let reply = RULES
        .iter()
        .find(|rule| lower.contains(rule.keyword))
        .map(|rule| rule.reply)
        .unwrap_or(DEFAULT_REPLY);
    Some(reply.replace(CURRENCY, currency_symbol))
}
