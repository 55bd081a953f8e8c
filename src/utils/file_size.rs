pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Human-readable size for the file rows, e.g. `1.50 MB`
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        match unit_index {
            0 => format!("{} {}", size as u64, UNITS[0]),
            _ => format!("{:.2} {}", size, UNITS[unit_index]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(FileSizeUtils::format_size(0), "0 B");
        assert_eq!(FileSizeUtils::format_size(1023), "1023 B");
        assert_eq!(FileSizeUtils::format_size(1536), "1.50 KB");
        assert_eq!(FileSizeUtils::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
