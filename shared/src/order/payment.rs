//! Payment method vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accepted payment methods
///
/// `cash` is settled at the table by the waiter; the rest are gateway
/// methods whose completion arrives through the payment callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Momo,
    Vnpay,
    Zalopay,
    Stripe,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Momo => "momo",
            PaymentMethod::Vnpay => "vnpay",
            PaymentMethod::Zalopay => "zalopay",
            PaymentMethod::Stripe => "stripe",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "momo" => Ok(PaymentMethod::Momo),
            "vnpay" => Ok(PaymentMethod::Vnpay),
            "zalopay" => Ok(PaymentMethod::Zalopay),
            "stripe" => Ok(PaymentMethod::Stripe),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_wire_strings() {
        for s in ["cash", "momo", "vnpay", "zalopay", "stripe"] {
            let method: PaymentMethod = s.parse().unwrap();
            assert_eq!(method.as_str(), s);
        }
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }
}
