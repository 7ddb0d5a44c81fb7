//! # Engine Schema
//!
//! Payload shapes for the engine resource and the relational schema of the
//! three tables behind it.
//!
//! - `MotorCreate`: write payload (create and update), never carries an id
//! - `Motor`: read shape, the write payload plus the generated id
//! - `Marca` / `TipoMotor`: read-only reference rows

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Engine table name
pub const MOTORES_TABLE: &str = "motores";

/// DDL for the engine table and its two reference tables.
///
/// Idempotent. Applying it is left to whoever provisions the store.
pub const SCHEMA_SQL: &str = r#"CREATE TABLE IF NOT EXISTS "marcas" (
    id      INTEGER PRIMARY KEY,
    nombre  VARCHAR NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS "tipos_motor" (
    id      INTEGER PRIMARY KEY,
    nombre  VARCHAR NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS "motores" (
    id                 VARCHAR PRIMARY KEY,
    nombre_modelo      VARCHAR NOT NULL,
    litraje            NUMERIC(3, 1) NOT NULL,
    potencia_hp        INTEGER,
    fecha_lanzamiento  DATE,
    marca_id           INTEGER NOT NULL REFERENCES "marcas" (id),
    tipo_motor_id      INTEGER NOT NULL REFERENCES "tipos_motor" (id)
);

CREATE INDEX IF NOT EXISTS ix_motores_nombre_modelo ON "motores" (nombre_modelo);
"#;

/// Brand reference row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Marca {
    pub id: i32,
    pub nombre: String,
}

/// Engine type reference row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TipoMotor {
    pub id: i32,
    pub nombre: String,
}

/// Write payload for create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MotorCreate {
    #[schema(example = "EcoBoost")]
    pub nombre_modelo: String,

    /// Displacement in litres, one fractional digit
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 2.0)]
    pub litraje: Decimal,

    #[serde(default)]
    #[schema(example = 250)]
    pub potencia_hp: Option<i32>,

    #[serde(default)]
    pub fecha_lanzamiento: Option<NaiveDate>,

    /// Must reference an existing brand
    #[schema(example = 1)]
    pub marca_id: i32,

    /// Must reference an existing engine type
    #[schema(example = 1)]
    pub tipo_motor_id: i32,
}

impl MotorCreate {
    /// Writable columns, in bind order.
    ///
    /// Statement text is built from this list only, never from input.
    pub const COLUMNS: [&'static str; 6] = [
        "nombre_modelo",
        "litraje",
        "potencia_hp",
        "fecha_lanzamiento",
        "marca_id",
        "tipo_motor_id",
    ];

    /// Attach an id, producing the stored shape
    pub fn into_motor(self, id: String) -> Motor {
        Motor {
            id,
            nombre_modelo: self.nombre_modelo,
            litraje: self.litraje,
            potencia_hp: self.potencia_hp,
            fecha_lanzamiento: self.fecha_lanzamiento,
            marca_id: self.marca_id,
            tipo_motor_id: self.tipo_motor_id,
        }
    }
}

/// Engine record as stored and returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Motor {
    /// Server-generated UUID
    pub id: String,

    pub nombre_modelo: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub litraje: Decimal,

    pub potencia_hp: Option<i32>,

    pub fecha_lanzamiento: Option<NaiveDate>,

    pub marca_id: i32,

    pub tipo_motor_id: i32,
}

impl Motor {
    /// Strip the id, leaving the writable fields
    pub fn payload(&self) -> MotorCreate {
        MotorCreate {
            nombre_modelo: self.nombre_modelo.clone(),
            litraje: self.litraje,
            potencia_hp: self.potencia_hp,
            fecha_lanzamiento: self.fecha_lanzamiento,
            marca_id: self.marca_id,
            tipo_motor_id: self.tipo_motor_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_may_be_absent() {
        let payload: MotorCreate = serde_json::from_value(json!({
            "nombre_modelo": "EcoBoost",
            "litraje": 2.0,
            "marca_id": 1,
            "tipo_motor_id": 1
        }))
        .unwrap();

        assert_eq!(payload.potencia_hp, None);
        assert_eq!(payload.fecha_lanzamiento, None);
        assert_eq!(payload.litraje, Decimal::new(20, 1));
    }

    #[test]
    fn test_optional_fields_may_be_null() {
        let payload: MotorCreate = serde_json::from_value(json!({
            "nombre_modelo": "Duratec",
            "litraje": 2.5,
            "potencia_hp": null,
            "fecha_lanzamiento": null,
            "marca_id": 2,
            "tipo_motor_id": 3
        }))
        .unwrap();

        assert_eq!(payload.potencia_hp, None);
        assert_eq!(payload.fecha_lanzamiento, None);
    }

    #[test]
    fn test_mandatory_fields_required() {
        for missing in ["nombre_modelo", "litraje", "marca_id", "tipo_motor_id"] {
            let mut body = json!({
                "nombre_modelo": "EcoBoost",
                "litraje": 2.0,
                "marca_id": 1,
                "tipo_motor_id": 1
            });
            body.as_object_mut().unwrap().remove(missing);

            let result: Result<MotorCreate, _> = serde_json::from_value(body);
            assert!(result.is_err(), "payload without {} must be rejected", missing);
        }
    }

    #[test]
    fn test_type_conformance() {
        let result: Result<MotorCreate, _> = serde_json::from_value(json!({
            "nombre_modelo": "EcoBoost",
            "litraje": 2.0,
            "marca_id": "uno",
            "tipo_motor_id": 1
        }));
        assert!(result.is_err());

        let result: Result<MotorCreate, _> = serde_json::from_value(json!({
            "nombre_modelo": "EcoBoost",
            "litraje": 2.0,
            "fecha_lanzamiento": "not-a-date",
            "marca_id": 1,
            "tipo_motor_id": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_motor_serializes_litraje_as_number() {
        let motor = Motor {
            id: "abc".to_string(),
            nombre_modelo: "EcoBoost".to_string(),
            litraje: Decimal::new(20, 1),
            potencia_hp: Some(250),
            fecha_lanzamiento: NaiveDate::from_ymd_opt(2011, 3, 1),
            marca_id: 1,
            tipo_motor_id: 1,
        };

        let value = serde_json::to_value(&motor).unwrap();
        assert_eq!(value["litraje"], json!(2.0));
        assert_eq!(value["fecha_lanzamiento"], json!("2011-03-01"));
        assert_eq!(value["potencia_hp"], json!(250));
    }

    #[test]
    fn test_id_not_part_of_write_columns() {
        assert!(!MotorCreate::COLUMNS.contains(&"id"));
    }

    #[test]
    fn test_payload_round_trips_through_motor() {
        let payload = MotorCreate {
            nombre_modelo: "TSI".to_string(),
            litraje: Decimal::new(14, 1),
            potencia_hp: None,
            fecha_lanzamiento: None,
            marca_id: 4,
            tipo_motor_id: 2,
        };
        let motor = payload.clone().into_motor("id-1".to_string());
        assert_eq!(motor.id, "id-1");
        assert_eq!(motor.payload(), payload);
    }

    #[test]
    fn test_schema_declares_foreign_keys() {
        assert!(SCHEMA_SQL.contains(r#"REFERENCES "marcas" (id)"#));
        assert!(SCHEMA_SQL.contains(r#"REFERENCES "tipos_motor" (id)"#));
        assert!(SCHEMA_SQL.contains("NUMERIC(3, 1)"));
    }
}
