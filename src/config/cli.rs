use crate::domain::model::{Commitment, SubscriptionTier};
use crate::forms::{AmbassadorFormData, BusinessEdit};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "patriot-forms")]
#[command(about = "Ambassador enrollment and business registration forms")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML config file (defaults to SUPABASE_* environment variables)")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, global = true, help = "Use an in-memory store instead of the remote database")]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit an ambassador enrollment
    Enroll {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        church: String,
        #[arg(long = "commitment", help = "Repeat for each accepted commitment")]
        commitments: Vec<Commitment>,
    },
    /// Register a new business, or update the one already stored for --place-id
    Business {
        #[arg(long)]
        place_id: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        church: Option<String>,
        #[arg(long)]
        business_name: Option<String>,
        #[arg(long)]
        business_address: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        business_description: Option<String>,
        #[arg(long)]
        subscription_tier: Option<SubscriptionTier>,
        #[arg(long)]
        monthly_fee: Option<f64>,
    },
    /// Look up a business by its place identifier
    Lookup {
        #[arg(long)]
        place_id: String,
    },
    /// Claim an unclaimed business for a user
    Claim {
        #[arg(long)]
        business_id: String,
        #[arg(long)]
        user_id: String,
    },
}

impl Command {
    pub fn ambassador_data(&self) -> Option<AmbassadorFormData> {
        match self {
            Command::Enroll {
                first_name,
                last_name,
                email,
                phone,
                church,
                commitments,
            } => Some(AmbassadorFormData {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                church: church.clone(),
                commitments: commitments.clone(),
            }),
            _ => None,
        }
    }

    /// 只為有提供的參數產生編輯，讓既有商家保留預填值
    pub fn business_edits(&self) -> Vec<BusinessEdit> {
        let Command::Business {
            first_name,
            last_name,
            contact_email,
            phone,
            church,
            business_name,
            business_address,
            website,
            business_description,
            subscription_tier,
            monthly_fee,
            ..
        } = self
        else {
            return Vec::new();
        };

        let mut edits = Vec::new();
        if let Some(v) = first_name {
            edits.push(BusinessEdit::FirstName(v.clone()));
        }
        if let Some(v) = last_name {
            edits.push(BusinessEdit::LastName(v.clone()));
        }
        if let Some(v) = contact_email {
            edits.push(BusinessEdit::ContactEmail(v.clone()));
        }
        if phone.is_some() {
            edits.push(BusinessEdit::Phone(phone.clone()));
        }
        if church.is_some() {
            edits.push(BusinessEdit::Church(church.clone()));
        }
        if let Some(v) = business_name {
            edits.push(BusinessEdit::BusinessName(v.clone()));
        }
        if let Some(v) = business_address {
            edits.push(BusinessEdit::BusinessAddress(v.clone()));
        }
        if website.is_some() {
            edits.push(BusinessEdit::Website(website.clone()));
        }
        if let Some(v) = business_description {
            edits.push(BusinessEdit::BusinessDescription(v.clone()));
        }
        if let Some(tier) = subscription_tier {
            edits.push(BusinessEdit::SubscriptionTier(*tier));
        }
        if let Some(fee) = monthly_fee {
            edits.push(BusinessEdit::MonthlyFee(*fee));
        }
        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enroll_with_commitments() {
        let config = CliConfig::try_parse_from([
            "patriot-forms",
            "enroll",
            "--first-name",
            "Jane",
            "--last-name",
            "Doe",
            "--email",
            "j@x.com",
            "--commitment",
            "Be active",
            "--commitment",
            "support values",
        ])
        .unwrap();

        let data = config.command.ambassador_data().unwrap();
        assert_eq!(data.first_name, "Jane");
        assert!(data.phone.is_empty());
        assert_eq!(
            data.commitments,
            vec![Commitment::BeActive, Commitment::SupportValues]
        );
    }

    #[test]
    fn test_unknown_commitment_is_rejected() {
        let result = CliConfig::try_parse_from([
            "patriot-forms",
            "enroll",
            "--commitment",
            "Be lazy",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_business_edits_only_for_given_flags() {
        let config = CliConfig::try_parse_from([
            "patriot-forms",
            "--dry-run",
            "business",
            "--place-id",
            "place-1",
            "--business-name",
            "Corner Shop",
            "--subscription-tier",
            "premium",
        ])
        .unwrap();

        assert!(config.dry_run);
        assert_eq!(
            config.command.business_edits(),
            vec![
                BusinessEdit::BusinessName("Corner Shop".to_string()),
                BusinessEdit::SubscriptionTier(SubscriptionTier::Premium),
            ]
        );
    }
}
