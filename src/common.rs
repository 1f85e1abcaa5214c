pub mod characteristics {
    use btleplug::api::bleuuid::uuid_from_u16;
    use uuid::Uuid;

    pub const SOLAR_VOLTAGE: Uuid = uuid_from_u16(0xFF01);
    pub const SOLAR_CURRENT: Uuid = uuid_from_u16(0xFF02);
    pub const BATTERY_VOLTAGE: Uuid = uuid_from_u16(0xFF03);
    /// Energy generated since midnight, kWh
    pub const POWER_GENERATION_TODAY: Uuid = uuid_from_u16(0xFF04);
    pub const CONTROLLER_TEMPERATURE: Uuid = uuid_from_u16(0xFF05);
    pub const CHARGING_STATUS: Uuid = uuid_from_u16(0xFF06);

    pub const SET_CHARGING_MODE: Uuid = uuid_from_u16(0xFF11);
    pub const SET_VOLTAGE: Uuid = uuid_from_u16(0xFF12);
}
