//! The flat record produced by `DecodeVinValues`.
//!
//! vPIC answers every decode with the same set of variables, one string
//! each, empty when the variable does not apply. Only `vin` and `error_code`
//! are guaranteed; the rest default to the empty string.

use serde::{Deserialize, Serialize};

use crate::mapper::{Field, FieldKind, Record};

/// A decoded VIN. `error_code` is vPIC's own decode status (`"0"` for a
/// clean decode), not an HTTP error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub abs: String,
    pub active_safety_sys_note: String,
    pub adaptive_cruise_control: String,
    pub adaptive_driving_beam: String,
    pub adaptive_headlights: String,
    pub additional_error_text: String,
    pub air_bag_loc_curtain: String,
    pub air_bag_loc_front: String,
    pub air_bag_loc_knee: String,
    pub air_bag_loc_seat_cushion: String,
    pub air_bag_loc_side: String,
    pub auto_reverse_system: String,
    pub automatic_pedestrian_alerting_sound: String,
    pub axle_configuration: String,
    pub axles: String,
    pub base_price: String,
    pub battery_a: String,
    pub battery_a_to: String,
    pub battery_cells: String,
    pub battery_info: String,
    pub battery_kwh: String,
    pub battery_kwh_to: String,
    pub battery_modules: String,
    pub battery_packs: String,
    pub battery_type: String,
    pub battery_v: String,
    pub battery_v_to: String,
    pub bed_length_in: String,
    pub bed_type: String,
    pub blind_spot_intervention: String,
    pub blind_spot_mon: String,
    pub body_cab_type: String,
    pub body_class: String,
    pub brake_system_desc: String,
    pub brake_system_type: String,
    pub bus_floor_config_type: String,
    pub bus_length: String,
    pub bus_type: String,
    pub can_aacn: String,
    pub cash_for_clunkers: String,
    pub charger_level: String,
    pub charger_power_kw: String,
    pub cib: String,
    pub cooling_type: String,
    pub curb_weight_lb: String,
    pub custom_motorcycle_type: String,
    pub daytime_running_light: String,
    pub destination_market: String,
    pub displacement_cc: String,
    pub displacement_ci: String,
    pub displacement_l: String,
    pub doors: String,
    pub drive_type: String,
    pub driver_assist: String,
    pub dynamic_brake_support: String,
    pub edr: String,
    pub electrification_level: String,
    pub engine_configuration: String,
    pub engine_cycles: String,
    pub engine_cylinders: String,
    pub engine_hp: String,
    pub engine_hp_to: String,
    pub engine_kw: String,
    pub engine_manufacturer: String,
    pub engine_model: String,
    pub entertainment_system: String,
    pub error_code: String,
    pub error_text: String,
    pub esc: String,
    pub ev_drive_unit: String,
    pub forward_collision_warning: String,
    pub fuel_injection_type: String,
    pub fuel_type_primary: String,
    pub fuel_type_secondary: String,
    pub gcwr_from: String,
    pub gcwr_to: String,
    pub gvwr_from: String,
    pub gvwr_to: String,
    pub keyless_ignition: String,
    pub lane_centering_assistance: String,
    pub lane_departure_warning: String,
    pub lane_keep_system: String,
    pub lower_beam_headlamp_light_source: String,
    pub make: String,
    pub make_id: String,
    pub manufacturer: String,
    pub manufacturer_id: String,
    pub model: String,
    pub model_id: String,
    pub model_year: String,
    pub motorcycle_chassis_type: String,
    pub motorcycle_suspension_type: String,
    pub ncsa_body_type: String,
    pub ncsa_make: String,
    pub ncsa_map_exc_approved_by: String,
    pub ncsa_map_exc_approved_on: String,
    pub ncsa_mapping_exception: String,
    pub ncsa_model: String,
    pub ncsa_note: String,
    pub non_land_use: String,
    pub note: String,
    pub other_bus_info: String,
    pub other_engine_info: String,
    pub other_motorcycle_info: String,
    pub other_restraint_system_info: String,
    pub other_trailer_info: String,
    pub park_assist: String,
    pub pedestrian_automatic_emergency_braking: String,
    pub plant_city: String,
    pub plant_company_name: String,
    pub plant_country: String,
    pub plant_state: String,
    pub possible_values: String,
    pub pretensioner: String,
    pub rear_automatic_emergency_braking: String,
    pub rear_cross_traffic_alert: String,
    pub rear_visibility_system: String,
    pub sae_automation_level: String,
    pub sae_automation_level_to: String,
    pub seat_belts_all: String,
    pub seat_rows: String,
    pub seats: String,
    pub semiautomatic_headlamp_beam_switching: String,
    pub series: String,
    pub series2: String,
    pub steering_location: String,
    pub suggested_vin: String,
    pub top_speed_mph: String,
    pub tpms: String,
    pub track_width: String,
    pub traction_control: String,
    pub trailer_body_type: String,
    pub trailer_length: String,
    pub trailer_type: String,
    pub transmission_speeds: String,
    pub transmission_style: String,
    pub trim: String,
    pub trim2: String,
    pub turbo: String,
    pub valve_train_design: String,
    pub vehicle_descriptor: String,
    pub vehicle_type: String,
    pub vin: String,
    pub wheel_base_long: String,
    pub wheel_base_short: String,
    pub wheel_base_type: String,
    pub wheel_size_front: String,
    pub wheel_size_rear: String,
    pub wheels: String,
    pub windows: String,
}

impl Vehicle {
    /// Whether vPIC decoded the VIN without reporting a problem.
    pub fn is_clean_decode(&self) -> bool {
        self.error_code.split(',').all(|code| code.trim() == "0")
    }
}

impl Record for Vehicle {
    const NAME: &'static str = "Vehicle";
    const FIELDS: &'static [Field] = &[
        Field::optional("abs", FieldKind::Text),
        Field::optional("active_safety_sys_note", FieldKind::Text),
        Field::optional("adaptive_cruise_control", FieldKind::Text),
        Field::optional("adaptive_driving_beam", FieldKind::Text),
        Field::optional("adaptive_headlights", FieldKind::Text),
        Field::optional("additional_error_text", FieldKind::Text),
        Field::optional("air_bag_loc_curtain", FieldKind::Text),
        Field::optional("air_bag_loc_front", FieldKind::Text),
        Field::optional("air_bag_loc_knee", FieldKind::Text),
        Field::optional("air_bag_loc_seat_cushion", FieldKind::Text),
        Field::optional("air_bag_loc_side", FieldKind::Text),
        Field::optional("auto_reverse_system", FieldKind::Text),
        Field::optional("automatic_pedestrian_alerting_sound", FieldKind::Text),
        Field::optional("axle_configuration", FieldKind::Text),
        Field::optional("axles", FieldKind::Text),
        Field::optional("base_price", FieldKind::Text),
        Field::optional("battery_a", FieldKind::Text),
        Field::optional("battery_a_to", FieldKind::Text),
        Field::optional("battery_cells", FieldKind::Text),
        Field::optional("battery_info", FieldKind::Text),
        Field::optional("battery_kwh", FieldKind::Text),
        Field::optional("battery_kwh_to", FieldKind::Text),
        Field::optional("battery_modules", FieldKind::Text),
        Field::optional("battery_packs", FieldKind::Text),
        Field::optional("battery_type", FieldKind::Text),
        Field::optional("battery_v", FieldKind::Text),
        Field::optional("battery_v_to", FieldKind::Text),
        Field::optional("bed_length_in", FieldKind::Text),
        Field::optional("bed_type", FieldKind::Text),
        Field::optional("blind_spot_intervention", FieldKind::Text),
        Field::optional("blind_spot_mon", FieldKind::Text),
        Field::optional("body_cab_type", FieldKind::Text),
        Field::optional("body_class", FieldKind::Text),
        Field::optional("brake_system_desc", FieldKind::Text),
        Field::optional("brake_system_type", FieldKind::Text),
        Field::optional("bus_floor_config_type", FieldKind::Text),
        Field::optional("bus_length", FieldKind::Text),
        Field::optional("bus_type", FieldKind::Text),
        Field::optional("can_aacn", FieldKind::Text),
        Field::optional("cash_for_clunkers", FieldKind::Text),
        Field::optional("charger_level", FieldKind::Text),
        Field::optional("charger_power_kw", FieldKind::Text),
        Field::optional("cib", FieldKind::Text),
        Field::optional("cooling_type", FieldKind::Text),
        Field::optional("curb_weight_lb", FieldKind::Text),
        Field::optional("custom_motorcycle_type", FieldKind::Text),
        Field::optional("daytime_running_light", FieldKind::Text),
        Field::optional("destination_market", FieldKind::Text),
        Field::optional("displacement_cc", FieldKind::Text),
        Field::optional("displacement_ci", FieldKind::Text),
        Field::optional("displacement_l", FieldKind::Text),
        Field::optional("doors", FieldKind::Text),
        Field::optional("drive_type", FieldKind::Text),
        Field::optional("driver_assist", FieldKind::Text),
        Field::optional("dynamic_brake_support", FieldKind::Text),
        Field::optional("edr", FieldKind::Text),
        Field::optional("electrification_level", FieldKind::Text),
        Field::optional("engine_configuration", FieldKind::Text),
        Field::optional("engine_cycles", FieldKind::Text),
        Field::optional("engine_cylinders", FieldKind::Text),
        Field::optional("engine_hp", FieldKind::Text),
        Field::optional("engine_hp_to", FieldKind::Text),
        Field::optional("engine_kw", FieldKind::Text),
        Field::optional("engine_manufacturer", FieldKind::Text),
        Field::optional("engine_model", FieldKind::Text),
        Field::optional("entertainment_system", FieldKind::Text),
        Field::required("error_code", FieldKind::Text),
        Field::optional("error_text", FieldKind::Text),
        Field::optional("esc", FieldKind::Text),
        Field::optional("ev_drive_unit", FieldKind::Text),
        Field::optional("forward_collision_warning", FieldKind::Text),
        Field::optional("fuel_injection_type", FieldKind::Text),
        Field::optional("fuel_type_primary", FieldKind::Text),
        Field::optional("fuel_type_secondary", FieldKind::Text),
        Field::optional("gcwr_from", FieldKind::Text),
        Field::optional("gcwr_to", FieldKind::Text),
        Field::optional("gvwr_from", FieldKind::Text),
        Field::optional("gvwr_to", FieldKind::Text),
        Field::optional("keyless_ignition", FieldKind::Text),
        Field::optional("lane_centering_assistance", FieldKind::Text),
        Field::optional("lane_departure_warning", FieldKind::Text),
        Field::optional("lane_keep_system", FieldKind::Text),
        Field::optional("lower_beam_headlamp_light_source", FieldKind::Text),
        Field::optional("make", FieldKind::Text),
        Field::optional("make_id", FieldKind::Text),
        Field::optional("manufacturer", FieldKind::Text),
        Field::optional("manufacturer_id", FieldKind::Text),
        Field::optional("model", FieldKind::Text),
        Field::optional("model_id", FieldKind::Text),
        Field::optional("model_year", FieldKind::Text),
        Field::optional("motorcycle_chassis_type", FieldKind::Text),
        Field::optional("motorcycle_suspension_type", FieldKind::Text),
        Field::optional("ncsa_body_type", FieldKind::Text),
        Field::optional("ncsa_make", FieldKind::Text),
        Field::optional("ncsa_map_exc_approved_by", FieldKind::Text),
        Field::optional("ncsa_map_exc_approved_on", FieldKind::Text),
        Field::optional("ncsa_mapping_exception", FieldKind::Text),
        Field::optional("ncsa_model", FieldKind::Text),
        Field::optional("ncsa_note", FieldKind::Text),
        Field::optional("non_land_use", FieldKind::Text),
        Field::optional("note", FieldKind::Text),
        Field::optional("other_bus_info", FieldKind::Text),
        Field::optional("other_engine_info", FieldKind::Text),
        Field::optional("other_motorcycle_info", FieldKind::Text),
        Field::optional("other_restraint_system_info", FieldKind::Text),
        Field::optional("other_trailer_info", FieldKind::Text),
        Field::optional("park_assist", FieldKind::Text),
        Field::optional("pedestrian_automatic_emergency_braking", FieldKind::Text),
        Field::optional("plant_city", FieldKind::Text),
        Field::optional("plant_company_name", FieldKind::Text),
        Field::optional("plant_country", FieldKind::Text),
        Field::optional("plant_state", FieldKind::Text),
        Field::optional("possible_values", FieldKind::Text),
        Field::optional("pretensioner", FieldKind::Text),
        Field::optional("rear_automatic_emergency_braking", FieldKind::Text),
        Field::optional("rear_cross_traffic_alert", FieldKind::Text),
        Field::optional("rear_visibility_system", FieldKind::Text),
        Field::optional("sae_automation_level", FieldKind::Text),
        Field::optional("sae_automation_level_to", FieldKind::Text),
        Field::optional("seat_belts_all", FieldKind::Text),
        Field::optional("seat_rows", FieldKind::Text),
        Field::optional("seats", FieldKind::Text),
        Field::optional("semiautomatic_headlamp_beam_switching", FieldKind::Text),
        Field::optional("series", FieldKind::Text),
        Field::optional("series2", FieldKind::Text),
        Field::optional("steering_location", FieldKind::Text),
        Field::optional("suggested_vin", FieldKind::Text),
        Field::optional("top_speed_mph", FieldKind::Text),
        Field::optional("tpms", FieldKind::Text),
        Field::optional("track_width", FieldKind::Text),
        Field::optional("traction_control", FieldKind::Text),
        Field::optional("trailer_body_type", FieldKind::Text),
        Field::optional("trailer_length", FieldKind::Text),
        Field::optional("trailer_type", FieldKind::Text),
        Field::optional("transmission_speeds", FieldKind::Text),
        Field::optional("transmission_style", FieldKind::Text),
        Field::optional("trim", FieldKind::Text),
        Field::optional("trim2", FieldKind::Text),
        Field::optional("turbo", FieldKind::Text),
        Field::optional("valve_train_design", FieldKind::Text),
        Field::optional("vehicle_descriptor", FieldKind::Text),
        Field::optional("vehicle_type", FieldKind::Text),
        Field::required("vin", FieldKind::Text),
        Field::optional("wheel_base_long", FieldKind::Text),
        Field::optional("wheel_base_short", FieldKind::Text),
        Field::optional("wheel_base_type", FieldKind::Text),
        Field::optional("wheel_size_front", FieldKind::Text),
        Field::optional("wheel_size_rear", FieldKind::Text),
        Field::optional("wheels", FieldKind::Text),
        Field::optional("windows", FieldKind::Text),
    ];
}
