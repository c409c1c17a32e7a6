// Package-specific creation rules.
//
// Launch promotions are blocked client-side until a hero image is attached.
// Custom/enterprise packages skip automated pricing entirely and produce an
// outbound contact mailto instead; nothing changes server-side until the
// deal is negotiated manually.

use thiserror::Error;

use super::types::PackageType;

/// Sales contact for negotiated packages.
pub const ENTERPRISE_CONTACT: &str = "partnerships@moddesk.example";

#[derive(Debug, Error, PartialEq)]
pub enum CreationError {
    #[error("the launch package requires a hero image before the promotion can be created")]
    MissingHeroImage,
    #[error("an investment amount greater than zero is required for the {0:?} package")]
    MissingInvestment(PackageType),
}

/// Client-side gate run before the create call is issued.
pub fn validate_creation(
    package: PackageType,
    investment: Option<u64>,
    has_hero_image: bool,
) -> Result<(), CreationError> {
    if package.requires_hero_image() && !has_hero_image {
        return Err(CreationError::MissingHeroImage);
    }
    if !package.is_negotiated() && investment.unwrap_or(0) == 0 {
        return Err(CreationError::MissingInvestment(package));
    }
    Ok(())
}

/// Build the outbound contact link for a custom/enterprise enquiry.
pub fn custom_contact_mailto(content_title: &str, organisation: &str) -> String {
    let subject = format!("Custom promotion enquiry: {content_title}");
    let body = format!(
        "Hello,\n\nWe would like to discuss a custom promotion package for \"{content_title}\" ({organisation}).\n"
    );
    format!(
        "mailto:{}?subject={}&body={}",
        ENTERPRISE_CONTACT,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}
