//! Hypermedia (HAL-style) representations of tickets.
//!
//! The link set is static: every ticket gets the same relations, built from
//! the route templates in [`routes`](super::routes).

use serde::ser::{Serialize, SerializeMap, Serializer};
use edutech_core::Ticket;

/// Base path of the ticket API.
pub const BASE_PATH: &str = "/api/edutech";

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Link {
    pub href: String,
    /// Set when `href` contains a `{placeholder}` the client must fill in.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
}

/// Named links, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Links(Vec<(&'static str, Link)>);

impl Links {
    fn push(mut self, rel: &'static str, href: String) -> Self {
        self.0.push((
            rel,
            Link {
                href,
                templated: false,
            },
        ));
        self
    }

    fn push_templated(mut self, rel: &'static str, href: String) -> Self {
        self.0.push((
            rel,
            Link {
                href,
                templated: true,
            },
        ));
        self
    }

    /// Look up a link by relation name.
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|(r, _)| *r == rel).map(|(_, link)| link)
    }

    pub fn rels(&self) -> Vec<&'static str> {
        self.0.iter().map(|(rel, _)| *rel).collect()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, link) in &self.0 {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}

/// A ticket with its links.
#[derive(Debug, serde::Serialize)]
pub struct TicketModel {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(rename = "_links")]
    pub links: Links,
}

/// A list of tickets with collection-level links.
#[derive(Debug, serde::Serialize)]
pub struct TicketCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedTickets,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, serde::Serialize)]
pub struct EmbeddedTickets {
    pub tickets: Vec<TicketModel>,
}

/// Builds link hrefs, optionally prefixed with an absolute origin.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_default(),
        }
    }

    fn href(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, BASE_PATH, path)
    }

    /// URL of a single ticket; also used as the `Location` of a 201.
    pub fn ticket_href(&self, id: i64) -> String {
        self.href(&format!("/{}", id))
    }

    fn collection_href(&self) -> String {
        self.href("")
    }

    fn customer_href(&self, customer_id: i64) -> String {
        self.href(&format!("/cliente/{}", customer_id))
    }

    fn status_href(&self, status: &str) -> String {
        self.href(&format!("/estado/{}", urlencoding::encode(status)))
    }

    /// Links attached to every ticket representation.
    pub fn ticket_links(&self, ticket: &Ticket) -> Links {
        let self_href = self.ticket_href(ticket.id);
        Links::default()
            .push("self", self_href.clone())
            .push("tickets", self.collection_href())
            .push("update", self_href.clone())
            .push("delete", self_href.clone())
            .push_templated(
                "change-status",
                format!("{}/estado?nuevoEstado={{nuevoEstado}}", self_href),
            )
            .push("client-tickets", self.customer_href(ticket.customer_id))
            .push("status-tickets", self.status_href(&ticket.status))
    }

    pub fn ticket_model(&self, ticket: Ticket) -> TicketModel {
        let links = self.ticket_links(&ticket);
        TicketModel { ticket, links }
    }

    /// Links for `GET /api/edutech`.
    pub fn all_tickets_links(&self) -> Links {
        Links::default()
            .push("self", self.collection_href())
            .push("create", self.collection_href())
    }

    /// Links for `GET /api/edutech/cliente/{customer_id}`.
    pub fn customer_tickets_links(&self, customer_id: i64) -> Links {
        Links::default()
            .push("self", self.customer_href(customer_id))
            .push("tickets", self.collection_href())
    }

    /// Links for `GET /api/edutech/estado/{status}`.
    pub fn status_tickets_links(&self, status: &str) -> Links {
        Links::default()
            .push("self", self.status_href(status))
            .push("tickets", self.collection_href())
    }

    pub fn collection(&self, tickets: Vec<Ticket>, links: Links) -> TicketCollection {
        TicketCollection {
            embedded: EmbeddedTickets {
                tickets: tickets.into_iter().map(|t| self.ticket_model(t)).collect(),
            },
            links,
        }
    }
}
