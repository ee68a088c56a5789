use anyhow::{bail, Result};
use clap::Parser;
use client_core::{load_settings, CrawlerClient, SubmissionController, SubmissionState};
use shared::domain::{Deal, Site};

#[derive(Parser, Debug)]
struct Args {
    /// Target site identifier, e.g. fo1.altius.finance
    #[arg(long)]
    site: Site,
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    /// Overrides API_BASE_URL / the default local endpoint.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn deal_line(deal: &Deal) -> String {
    let mut line = format!("- {}", deal.title);
    if let Some(asset_class) = &deal.asset_class {
        line.push_str(&format!(" | asset class: {asset_class}"));
    }
    if let Some(status) = &deal.status {
        line.push_str(&format!(" | status: {status}"));
    }
    if let Some(currency) = &deal.currency {
        line.push_str(&format!(" | currency: {currency}"));
    }
    if let Some(minimum_ticket) = deal.minimum_ticket {
        line.push_str(&format!(" | minimum ticket: {minimum_ticket}"));
    }
    line
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let base_url = args
        .api_base_url
        .unwrap_or_else(|| load_settings().api_base_url);
    let client = CrawlerClient::new(base_url);

    let mut controller = SubmissionController::new(args.site);
    controller.set_username(args.username);
    controller.set_password(args.password);
    controller.submit(&client).await?;

    match controller.state() {
        SubmissionState::Succeeded { result } => {
            println!("Website: {}", result.website);
            if let Some(token) = &result.token {
                println!("Token: {token}");
            }
            if result.deals.is_empty() {
                println!("No deals found.");
            } else {
                println!("Deals:");
                for deal in &result.deals {
                    println!("{}", deal_line(deal));
                }
            }
            Ok(())
        }
        SubmissionState::Failed { message, .. } => bail!("{message}"),
        // submit always settles into Succeeded or Failed.
        other => bail!("submission did not settle: {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::DealId;

    #[test]
    fn deal_line_includes_only_present_metadata() {
        let deal = Deal {
            id: DealId(1),
            title: "Deal A".to_string(),
            asset_class: Some("Equity".to_string()),
            status: None,
            currency: Some("USD".to_string()),
            minimum_ticket: None,
        };
        assert_eq!(deal_line(&deal), "- Deal A | asset class: Equity | currency: USD");
    }
}
