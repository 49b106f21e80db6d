use crate::core::normalizer::{
    clean_link, compose_location, DEFAULT_COMPANY, DEFAULT_PHONE, DEFAULT_POSITION, PLACEHOLDER,
};
use crate::domain::model::{AdminCompany, Lead, LeadLinks};

/// Maps a backend company row onto the lead shape used by listing and export.
pub fn lead_from_company(row: &AdminCompany) -> Lead {
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let company = text(&row.company).unwrap_or_else(|| DEFAULT_COMPANY.to_string());
    let city = text(&row.city);
    let country = text(&row.country);
    let location = compose_location(city.as_deref(), country.as_deref())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    Lead {
        id: row.id.clone(),
        name: company.clone(),
        position: DEFAULT_POSITION.to_string(),
        email: PLACEHOLDER.to_string(),
        phone: text(&row.phone).unwrap_or_else(|| DEFAULT_PHONE.to_string()),
        address: text(&row.address).unwrap_or_else(|| company.clone()),
        company,
        industry: PLACEHOLDER.to_string(),
        size: PLACEHOLDER.to_string(),
        location,
        city: city.unwrap_or_else(|| PLACEHOLDER.to_string()),
        country: country.unwrap_or_else(|| PLACEHOLDER.to_string()),
        rating: row.rating,
        reviews: row.reviews,
        type_business: text(&row.type_business).unwrap_or_else(|| PLACEHOLDER.to_string()),
        links: LeadLinks {
            linkedin: None,
            website: clean_link(row.website.as_deref()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_row_becomes_lead() {
        let row = AdminCompany {
            id: "c-1".to_string(),
            company: Some("Kopi Kenangan".to_string()),
            website: Some("kopikenangan.com".to_string()),
            rating: Some(4.6),
            reviews: Some(1200),
            type_business: Some("Cafe".to_string()),
            city: Some("Jakarta".to_string()),
            country: Some("Indonesia".to_string()),
            ..Default::default()
        };

        let lead = lead_from_company(&row);
        assert_eq!(lead.id, "c-1");
        assert_eq!(lead.name, "Kopi Kenangan");
        assert_eq!(lead.address, "Kopi Kenangan");
        assert_eq!(lead.location, "Jakarta, Indonesia");
        assert_eq!(lead.links.website.as_deref(), Some("https://kopikenangan.com"));
        assert_eq!(lead.reviews, Some(1200));
    }

    #[test]
    fn test_sparse_company_row_is_defaulted() {
        let row = AdminCompany {
            id: "c-2".to_string(),
            website: Some("null".to_string()),
            ..Default::default()
        };

        let lead = lead_from_company(&row);
        assert_eq!(lead.company, DEFAULT_COMPANY);
        assert_eq!(lead.phone, DEFAULT_PHONE);
        assert_eq!(lead.location, PLACEHOLDER);
        assert_eq!(lead.links.website, None);
    }
}
