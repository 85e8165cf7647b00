//! Prompt template and user-facing messages

use crate::error::Result;
use minijinja::{Environment, context};

/// Relevance check prompt
///
/// Variables: `coin`, `title`, `content`.
pub const RELEVANCE_PROMPT: &str = r#"You are a cryptocurrency market analyst. Decide whether the news article below could plausibly move the price of {{ coin }} within the next few days.

Only count news that is specifically about {{ coin }}, or about the wider crypto market in a way that directly affects it: regulation, exchange listings or delistings, hacks, protocol upgrades, large institutional flows, macro events. Generic market commentary, price recaps and advertorials are not relevant.

Article title: {{ title }}
Article content: {{ content }}

Reply with a single JSON object and nothing else:
{"relevant": true, "summary": "<one or two sentences on how this news could affect {{ coin }}'s price>"}
or
{"relevant": false, "summary": "<short reason>"}

If you cannot produce JSON, reply with "NOT RELEVANT" when the article is not relevant, otherwise with the summary alone."#;

/// Reply when the request carries no prompt
pub const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Reply when no known ticker appears in the prompt
pub const NO_SYMBOLS: &str = "I couldn't identify any cryptocurrency symbols in your message. Please specify the cryptocurrencies you want news for.";

/// Prefix of every error reply
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// Reply when nothing relevant survived filtering
pub fn no_news_message(hours: u64) -> String {
    format!("No relevant news found for the specified cryptocurrencies in the last {hours} hours.")
}

/// First line of a news report, including the blank line after it
pub fn report_header(hours: u64) -> String {
    format!(
        "Here are the latest news items relevant to changes in price movement of the mentioned tokens in the last {hours} hours:\n\n"
    )
}

/// Render the relevance prompt for one article
pub fn render_relevance(template: &str, coin: &str, title: &str, content: &str) -> Result<String> {
    let env = Environment::new();
    let tmpl = env.template_from_str(template)?;
    Ok(tmpl.render(context! { coin, title, content })?)
}
