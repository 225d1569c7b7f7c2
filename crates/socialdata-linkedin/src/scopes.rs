//! LinkedIn v2 OAuth permission names.

#![warn(missing_docs)]

/// View advertising campaigns you manage.
pub const R_AD_CAMPAIGNS: &str = "r_ad_campaigns";
/// Retrieve your advertising accounts.
pub const R_ADS: &str = "r_ads";
/// Access your Lead Gen Forms and retrieve leads.
pub const R_ADS_LEADGEN_AUTOMATION: &str = "r_ads_leadgen_automation";
/// Retrieve reporting for your advertising accounts.
pub const R_ADS_REPORTING: &str = "r_ads_reporting";
/// Primary email address of the member.
pub const R_EMAILADDRESS: &str = "r_emailaddress";
/// Name, headline and photo.
pub const R_LITEPROFILE: &str = "r_liteprofile";
/// Name, photo, headline and vanity name.
pub const R_BASICPROFILE: &str = "r_basicprofile";
/// Member posts, comments, likes and other engagement data.
pub const R_MEMBER_SOCIAL: &str = "r_member_social";
/// Organization posts, comments, likes and other engagement data.
pub const R_ORGANIZATION_SOCIAL: &str = "r_organization_social";
/// Manage your advertising campaigns.
pub const RW_AD_CAMPAIGNS: &str = "rw_ad_campaigns";
/// Manage your advertising accounts.
pub const RW_ADS: &str = "rw_ads";
/// Create and manage your matched audiences.
pub const RW_DMP_SEGMENTS: &str = "rw_dmp_segments";
/// Manage organization pages and retrieve reporting data.
pub const RW_ORGANIZATION_ADMIN: &str = "rw_organization_admin";
/// Manage your organization's page and post updates.
pub const RW_ORGANIZATION: &str = "rw_organization";
/// Post, comment and like on the member's behalf.
pub const W_MEMBER_SOCIAL: &str = "w_member_social";
/// Post, comment and like on the organization's behalf.
pub const W_ORGANIZATION_SOCIAL: &str = "w_organization_social";

/// Every known permission name.
pub const ALL: &[&str] = &[
    R_AD_CAMPAIGNS,
    R_ADS,
    R_ADS_LEADGEN_AUTOMATION,
    R_ADS_REPORTING,
    R_EMAILADDRESS,
    R_LITEPROFILE,
    R_BASICPROFILE,
    R_MEMBER_SOCIAL,
    R_ORGANIZATION_SOCIAL,
    RW_AD_CAMPAIGNS,
    RW_ADS,
    RW_DMP_SEGMENTS,
    RW_ORGANIZATION_ADMIN,
    RW_ORGANIZATION,
    W_MEMBER_SOCIAL,
    W_ORGANIZATION_SOCIAL,
];

/// Returns `true` if `scope` is a permission LinkedIn documents for v2.
#[must_use]
pub fn is_known(scope: &str) -> bool {
    ALL.contains(&scope)
}
