use crate::storage::IpRange;
use migration::entities::ip_range;

/// 将 Sea-ORM Model 转换为 IpRange（丢弃提交时分配的主键）
pub fn model_to_range(model: ip_range::Model) -> IpRange {
    IpRange {
        start_ip: model.start_ip,
        end_ip: model.end_ip,
        start_ip_int: model.start_ip_int,
        end_ip_int: model.end_ip_int,
        country: model.country,
        country_name: model.country_name,
        continent_name: model.continent_name,
        asn: model.asn,
        as_name: model.as_name,
        ip_version: model.ip_version,
    }
}

/// 将 IpRange 转换为 ActiveModel（用于批量插入；id 由数据库分配）
pub fn range_to_active_model(range: &IpRange) -> ip_range::ActiveModel {
    use sea_orm::ActiveValue::*;

    ip_range::ActiveModel {
        id: NotSet,
        start_ip: Set(range.start_ip.clone()),
        end_ip: Set(range.end_ip.clone()),
        start_ip_int: Set(range.start_ip_int.clone()),
        end_ip_int: Set(range.end_ip_int.clone()),
        country: Set(range.country.clone()),
        country_name: Set(range.country_name.clone()),
        continent_name: Set(range.continent_name.clone()),
        asn: Set(range.asn),
        as_name: Set(range.as_name.clone()),
        ip_version: Set(range.ip_version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn create_test_model() -> ip_range::Model {
        ip_range::Model {
            id: 7,
            start_ip: "1.0.0.0".to_string(),
            end_ip: "1.0.0.255".to_string(),
            start_ip_int: format!("{:039}", ((0xffffu128) << 32) | 0x0100_0000u128),
            end_ip_int: format!("{:039}", ((0xffffu128) << 32) | 0x0100_00ffu128),
            country: Some("AU".to_string()),
            country_name: Some("Australia".to_string()),
            continent_name: Some("Oceania".to_string()),
            asn: Some(13335),
            as_name: Some("Cloudflare".to_string()),
            ip_version: Some(4),
        }
    }

    #[test]
    fn test_model_to_range_basic() {
        let model = create_test_model();
        let expected_start = model.start_ip.clone();
        let expected_start_int = model.start_ip_int.clone();

        let range = model_to_range(model);

        assert_eq!(range.start_ip, expected_start);
        assert_eq!(range.start_ip_int, expected_start_int);
        assert_eq!(range.asn, Some(13335));
    }

    #[test]
    fn test_model_to_range_with_none_payload() {
        let mut model = create_test_model();
        model.country = None;
        model.asn = None;
        model.as_name = None;

        let range = model_to_range(model);

        assert!(range.country.is_none());
        assert!(range.asn.is_none());
        assert!(range.as_name.is_none());
    }

    #[test]
    fn test_range_to_active_model_id_not_set() {
        let range = model_to_range(create_test_model());
        let active_model = range_to_active_model(&range);

        // 身份由提交时分配，绝不从输入携带
        assert!(matches!(active_model.id, ActiveValue::NotSet));
        assert!(matches!(active_model.start_ip_int, ActiveValue::Set(_)));

        if let ActiveValue::Set(start_int) = active_model.start_ip_int {
            assert_eq!(start_int, range.start_ip_int);
        }
    }

    #[test]
    fn test_roundtrip_conversion() {
        let model = create_test_model();
        let range = model_to_range(model.clone());
        let active_model = range_to_active_model(&range);

        if let ActiveValue::Set(end_int) = active_model.end_ip_int {
            assert_eq!(end_int, model.end_ip_int);
        }
        if let ActiveValue::Set(country) = active_model.country {
            assert_eq!(country, model.country);
        }
    }
}
