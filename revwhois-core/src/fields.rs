//! Record fields that advanced search terms may target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ReverseWhoisError;

macro_rules! fields {
    ($($variant:ident => $wire:literal,)+) => {
        /// A queryable WHOIS record field, identified on the wire by its
        /// dotted camel-case name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $($variant,)+
        }

        impl Field {
            pub const ALL: &'static [Field] = &[$(Field::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Field::$variant => $wire,)+
                }
            }
        }

        impl FromStr for Field {
            type Err = ReverseWhoisError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Field::$variant),)+
                    _ => Err(ReverseWhoisError::parameter("Unknown field name.")),
                }
            }
        }
    };
}

fields! {
    DomainName => "domainName",
    WhoisServer => "whoisServer",
    RegistrarName => "registrarName",
    NameServers => "nameServers",

    RegistrantName => "registrantContact.name",
    RegistrantOrganization => "registrantContact.organization",
    RegistrantStreet => "registrantContact.street",
    RegistrantCity => "registrantContact.city",
    RegistrantState => "registrantContact.state",
    RegistrantPostalCode => "registrantContact.postalCode",
    RegistrantCountry => "registrantContact.country",
    RegistrantEmail => "registrantContact.email",
    RegistrantTelephone => "registrantContact.telephone",
    RegistrantFax => "registrantContact.fax",

    AdminName => "administrativeContact.name",
    AdminOrganization => "administrativeContact.organization",
    AdminStreet => "administrativeContact.street",
    AdminCity => "administrativeContact.city",
    AdminState => "administrativeContact.state",
    AdminPostalCode => "administrativeContact.postalCode",
    AdminCountry => "administrativeContact.country",
    AdminEmail => "administrativeContact.email",
    AdminTelephone => "administrativeContact.telephone",
    AdminFax => "administrativeContact.fax",

    BillingName => "billingContact.name",
    BillingOrganization => "billingContact.organization",
    BillingStreet => "billingContact.street",
    BillingCity => "billingContact.city",
    BillingState => "billingContact.state",
    BillingPostalCode => "billingContact.postalCode",
    BillingCountry => "billingContact.country",
    BillingEmail => "billingContact.email",
    BillingTelephone => "billingContact.telephone",
    BillingFax => "billingContact.fax",

    TechName => "technicalContact.name",
    TechOrganization => "technicalContact.organization",
    TechStreet => "technicalContact.street",
    TechCity => "technicalContact.city",
    TechState => "technicalContact.state",
    TechPostalCode => "technicalContact.postalCode",
    TechCountry => "technicalContact.country",
    TechEmail => "technicalContact.email",
    TechTelephone => "technicalContact.telephone",
    TechFax => "technicalContact.fax",

    ZoneName => "zoneContact.name",
    ZoneOrganization => "zoneContact.organization",
    ZoneStreet => "zoneContact.street",
    ZoneCity => "zoneContact.city",
    ZoneState => "zoneContact.state",
    ZonePostalCode => "zoneContact.postalCode",
    ZoneCountry => "zoneContact.country",
    ZoneEmail => "zoneContact.email",
    ZoneTelephone => "zoneContact.telephone",
    ZoneFax => "zoneContact.fax",
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
