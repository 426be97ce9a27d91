use lazy_static::lazy_static;
use pool_structures::{Pool, Rider};

fn rider(name: &str, pickup: &str, time: &str) -> Rider {
    Rider {
        name: name.to_owned(),
        pickup: pickup.to_owned(),
        time: time.to_owned(),
    }
}

fn stops(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

lazy_static! {
    static ref FALLBACK_TODAY: Vec<Pool> = vec![Pool {
        id: "pool-001".to_owned(),
        route_name: "Bangalore Central Express".to_owned(),
        riders: vec![
            rider("Priya Sharma", "Electronic City", "8:15 AM"),
            rider("Arjun Reddy", "MG Road Metro", "8:30 AM"),
            rider("Ananya Patel", "IISc Campus", "8:45 AM"),
        ],
        total_cost: 450.00,
        per_person: 150.00,
        distance: 28.5,
        duration: "1h 15m".to_owned(),
        pickup_order: stops(&["Electronic City", "MG Road Metro", "IISc Campus"]),
        destination: "Kempegowda Airport Terminal 2".to_owned(),
        completed_at: None,
    }];
    static ref FALLBACK_YESTERDAY: Vec<Pool> = vec![Pool {
        id: "pool-y001".to_owned(),
        route_name: "IIT Campus Shuttle".to_owned(),
        riders: vec![
            rider("Aditya Verma", "Hostel Block A", "7:30 AM"),
            rider("Riya Joshi", "Central Library", "7:45 AM"),
        ],
        total_cost: 320.00,
        per_person: 160.00,
        distance: 22.0,
        duration: "55m".to_owned(),
        pickup_order: stops(&["Hostel Block A", "Central Library"]),
        destination: "Indiranagar Metro".to_owned(),
        completed_at: Some("2024-01-15T09:25:00Z".to_owned()),
    }];
}

/// Shown for today when the API can't be reached
pub fn today() -> Vec<Pool> {
    FALLBACK_TODAY.clone()
}

/// Shown for yesterday when the API can't be reached
pub fn yesterday() -> Vec<Pool> {
    FALLBACK_YESTERDAY.clone()
}
