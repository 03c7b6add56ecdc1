// Host-side tests for visual parameters, presets and the parameter store.

use nebula_core::*;

#[test]
fn hex_colors_parse_long_and_short_forms() {
    assert_eq!("#00ffff".parse::<HexColor>(), Ok(HexColor::new(0, 255, 255)));
    assert_eq!("#FFD700".parse::<HexColor>(), Ok(HexColor::new(255, 215, 0)));
    assert_eq!("#adf".parse::<HexColor>(), Ok(HexColor::new(0xaa, 0xdd, 0xff)));
    assert_eq!(HexColor::new(255, 69, 0).to_string(), "#ff4500");
    for bad in ["", "00ffff", "#12345", "#gg0000", "#1234567", "#", "#ab"] {
        assert!(bad.parse::<HexColor>().is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn linear_conversion_fixes_endpoints() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    assert!(srgb_to_linear(0.5) < 0.5);
}

#[test]
fn defaults_and_presets_are_in_range() {
    assert!(VisualParameters::default().validate().is_ok());
    let all = presets();
    let names: Vec<_> = all.iter().map(|p| p.name).collect();
    assert_eq!(
        names,
        ["Cosmic Nebula", "Golden Fireflies", "Matrix Rain", "Ice Storm"]
    );
    assert_eq!(all[0].params, VisualParameters::default());
    for p in &all {
        assert!(p.params.validate().is_ok(), "{} out of range", p.name);
    }
}

#[test]
fn validate_names_the_offending_field() {
    for field in Field::ALL {
        let range = field.range();
        for value in [range.min - 1.0, range.max + 1.0] {
            let mut store = ParameterStore::default();
            let mut params = store.current().clone();
            match field {
                Field::Count => params.count = value.max(0.0) as u32,
                Field::Size => params.size = value as f32,
                Field::Speed => params.speed = value as f32,
                Field::NoiseStrength => params.noise_strength = value as f32,
                Field::Dispersion => params.dispersion = value as f32,
                Field::ShapeBias => params.shape_bias = value as f32,
            }
            match params.validate() {
                Err(ParamError::OutOfRange { field: name, .. }) => assert_eq!(name, field.name()),
                other => panic!("{field:?}={value}: expected OutOfRange, got {other:?}"),
            }
            assert!(store.replace(params).is_err());
            assert_eq!(store.current(), &VisualParameters::default());
            assert_eq!(store.revision(), 0);
        }
    }
}

#[test]
fn manual_edits_clamp_into_range() {
    let mut store = ParameterStore::default();
    assert_eq!(store.set_field(Field::Size, 10.0), Ok(3.0));
    assert_eq!(store.set_field(Field::Dispersion, -4.0), Ok(1.0));
    assert_eq!(store.set_field(Field::Count, 12345.4), Ok(12345.0));
    assert_eq!(store.current().count, 12345);
    assert_eq!(store.revision(), 3);
    assert!(store.current().validate().is_ok());

    assert!(matches!(
        store.set_field(Field::Speed, f64::NAN),
        Err(ParamError::NotFinite { field: "speed" })
    ));
    assert_eq!(store.revision(), 3);
}

#[test]
fn color_edits_reject_garbage() {
    let mut store = ParameterStore::default();
    assert!(store.set_color(ColorSlot::End, "purple").is_err());
    assert_eq!(store.current().color_end, HexColor::new(255, 0, 255));
    store.set_color(ColorSlot::Start, "#123").unwrap();
    assert_eq!(store.current().color(ColorSlot::Start), HexColor::new(0x11, 0x22, 0x33));
}

#[test]
fn presets_replace_the_whole_record() {
    let mut store = ParameterStore::default();
    store.set_field(Field::Size, 2.9).unwrap();
    let matrix = presets().into_iter().find(|p| p.name == "Matrix Rain").unwrap();
    store.apply_preset(&matrix).unwrap();
    assert_eq!(store.current(), &matrix.params);
    assert_eq!(store.revision(), 2);
}

#[test]
fn wire_names_are_camel_case() {
    let json = serde_json::to_value(VisualParameters::default()).unwrap();
    assert_eq!(json["noiseStrength"], serde_json::json!(1.2f32));
    assert_eq!(json["colorStart"], "#00ffff");
    assert_eq!(json["shapeBias"], serde_json::json!(0.2f32));
    for field in Field::ALL {
        assert!(json.get(field.name()).is_some());
    }
}

#[test]
fn digit_keys_select_presets_in_order() {
    assert_eq!(key_action("1"), Some(KeyAction::Preset(0)));
    assert_eq!(key_action("H"), Some(KeyAction::TogglePanel));
    assert_eq!(key_action("m"), Some(KeyAction::ToggleInputMode));
    assert_eq!(key_action("5"), None);
    assert_eq!(key_action("Enter"), None);

    let ice = preset_for(KeyAction::Preset(3)).unwrap();
    assert_eq!(ice.name, "Ice Storm");
    assert!(preset_for(KeyAction::TogglePanel).is_none());
}
