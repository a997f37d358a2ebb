use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub customer_id: &'static str,
    pub name: &'static str,
    pub tier: &'static str,
    pub city: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub vin: &'static str,
    pub make: &'static str,
    pub model: &'static str,
    pub year: u16,
}

// Static sample data. Lookups ignore case.
const CUSTOMERS: &[Customer] = &[
    Customer { customer_id: "CUST123", name: "Ada Lovelace", tier: "gold", city: "London" },
    Customer { customer_id: "CUST456", name: "Grace Hopper", tier: "silver", city: "Arlington" },
    Customer { customer_id: "CUST789", name: "Alan Turing", tier: "bronze", city: "Manchester" },
];

const VEHICLES: &[Vehicle] = &[
    Vehicle { vin: "VIN123", make: "Toyota", model: "Corolla", year: 2019 },
    Vehicle { vin: "VIN456", make: "Ford", model: "Mustang", year: 2021 },
    Vehicle { vin: "VIN789", make: "Volvo", model: "XC90", year: 2023 },
];

pub fn find_customer(customer_id: &str) -> Option<&'static Customer> {
    CUSTOMERS
        .iter()
        .find(|c| c.customer_id.eq_ignore_ascii_case(customer_id.trim()))
}

pub fn find_vehicle(vin: &str) -> Option<&'static Vehicle> {
    VEHICLES.iter().find(|v| v.vin.eq_ignore_ascii_case(vin.trim()))
}
