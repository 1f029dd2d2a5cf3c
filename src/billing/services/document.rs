//! HTML rendering of offer documents.

use crate::billing::domain::{BillingDomainError, Offer};
use crate::client::domain::Client;
use minijinja::{Environment, context};
use thiserror::Error;

/// Embedded template for the offer document.
const OFFER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Offer {{ title }}</title>
</head>
<body>
<header>
<h1>{{ company_name }}</h1>
<p>{{ contact_email }}</p>
</header>
<section>
<h2>{{ title }}</h2>
<p>Valid until {{ valid_until }}</p>
<table>
<thead>
<tr><th>Description</th><th>Quantity</th><th>Unit price</th><th>Total</th></tr>
</thead>
<tbody>
{% for item in items %}
<tr>
<td>{{ item.description }}</td>
<td>{{ item.quantity }}</td>
<td>{{ item.unit_price }}</td>
<td>{{ item.total }}</td>
</tr>
{% endfor %}
</tbody>
<tfoot>
<tr><td colspan="3">Grand total</td><td>{{ grand_total }}</td></tr>
</tfoot>
</table>
</section>
</body>
</html>
"#;

const TEMPLATE_NAME: &str = "offer_document";

/// Errors returned while rendering an offer document.
#[derive(Debug, Error)]
pub enum OfferDocumentError {
    /// A monetary total could not be computed.
    #[error(transparent)]
    Domain(#[from] BillingDomainError),
    /// The template failed to render.
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders offers into standalone HTML documents.
pub struct OfferDocumentRenderer {
    environment: Environment<'static>,
}

impl OfferDocumentRenderer {
    /// Creates a renderer with the embedded template.
    ///
    /// # Errors
    ///
    /// Returns [`OfferDocumentError::Template`] when the embedded template
    /// fails to parse.
    pub fn new() -> Result<Self, OfferDocumentError> {
        let mut environment = Environment::new();
        environment.add_template(TEMPLATE_NAME, OFFER_TEMPLATE)?;
        Ok(Self { environment })
    }

    /// Renders one offer with the addressed client's letterhead.
    ///
    /// # Errors
    ///
    /// Returns [`OfferDocumentError::Domain`] on amount overflow and
    /// [`OfferDocumentError::Template`] on rendering failures.
    pub fn render(&self, offer: &Offer, client: &Client) -> Result<String, OfferDocumentError> {
        let items = offer
            .line_items()
            .iter()
            .map(|item| {
                let total = item.total()?;
                Ok(context! {
                    description => item.description(),
                    quantity => item.quantity(),
                    unit_price => item.unit_price().to_string(),
                    total => total.to_string(),
                })
            })
            .collect::<Result<Vec<_>, BillingDomainError>>()?;
        let grand_total = offer.total()?;

        let template = self.environment.get_template(TEMPLATE_NAME)?;
        let rendered = template.render(context! {
            title => offer.title(),
            valid_until => offer.valid_until().to_string(),
            company_name => client.profile().company_name(),
            contact_email => client.profile().contact_email().as_str(),
            items => items,
            grand_total => grand_total.to_string(),
        })?;
        Ok(rendered)
    }
}
