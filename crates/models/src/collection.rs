use std::fmt;

/// The four collections of the `miahKitchen` database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    CateringData,
    Reviews,
    Orders,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Services,
        Collection::CateringData,
        Collection::Reviews,
        Collection::Orders,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::CateringData => "cateringData",
            Collection::Reviews => "reviews",
            Collection::Orders => "orders",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
