//! Canned vPIC results, stored with the upstream's own key spellings.

use serde_json::Value;

fn load(raw: &str) -> Value {
    serde_json::from_str(raw).expect("fixture is valid JSON")
}

macro_rules! fixtures {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name() -> Value {
                load(include_str!(concat!("../fixtures/", stringify!($name), ".json")))
            }
        )*
    };
}

fixtures!(
    decode_vin_values,
    decode_wmi,
    wmis_for_manufacturer,
    all_makes,
    parts,
    all_manufacturers,
    manufacturer_details,
    makes_for_manufacturer,
    makes_for_manufacturer_and_year,
    makes_for_vehicle_type,
    vehicle_types_for_make,
    models_for_make,
    equipment_plant_codes,
    vehicle_variable_list,
    vehicle_variable_values_list,
    canadian_vehicle_specifications,
);
