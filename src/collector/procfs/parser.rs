//! Parsers for `/proc` and `/sys` file contents.
//!
//! Pure functions over string input so they can be unit-tested with literal
//! content, independent of any filesystem.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Free and total memory parsed from `/proc/meminfo`, in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub free_kb: u64,
    pub total_kb: u64,
}

/// Parses `MemTotal` and `MemFree` out of `/proc/meminfo` content.
///
/// Lines look like `MemTotal:       16384000 kB`. Other lines are ignored.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut total_kb = None;
    let mut free_kb = None;

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "MemTotal" => &mut total_kb,
            "MemFree" => &mut free_kb,
            _ => continue,
        };
        let value = rest
            .trim()
            .split_whitespace()
            .next()
            .ok_or_else(|| ParseError::new(format!("empty value for {}", key)))?;
        *slot = Some(
            value
                .parse::<u64>()
                .map_err(|_| ParseError::new(format!("bad {} value: {}", key, value)))?,
        );
    }

    match (free_kb, total_kb) {
        (Some(free_kb), Some(total_kb)) => Ok(MemInfo { free_kb, total_kb }),
        _ => Err(ParseError::new("MemTotal/MemFree not found")),
    }
}

/// Extracts the first `model name` entry from `/proc/cpuinfo` content.
pub fn parse_cpu_model(content: &str) -> Result<String, ParseError> {
    for line in content.lines() {
        if let Some((key, value)) = line.split_once(':')
            && key.trim() == "model name"
        {
            return Ok(value.trim().to_string());
        }
    }
    Err(ParseError::new("model name not found in cpuinfo"))
}

/// Counts CPUs in a kernel cpu-list string such as `0-3,5,7-8`.
///
/// This is the format of `/sys/devices/system/cpu/online`.
pub fn parse_cpu_list(content: &str) -> Result<u32, ParseError> {
    let list = content.trim();
    if list.is_empty() {
        return Ok(0);
    }

    let mut count = 0u32;
    for part in list.split(',') {
        match part.split_once('-') {
            Some((lo, hi)) => {
                let lo: u32 = lo
                    .trim()
                    .parse()
                    .map_err(|_| ParseError::new(format!("bad cpu range: {}", part)))?;
                let hi: u32 = hi
                    .trim()
                    .parse()
                    .map_err(|_| ParseError::new(format!("bad cpu range: {}", part)))?;
                if hi < lo {
                    return Err(ParseError::new(format!("inverted cpu range: {}", part)));
                }
                count += hi - lo + 1;
            }
            None => {
                part.trim()
                    .parse::<u32>()
                    .map_err(|_| ParseError::new(format!("bad cpu id: {}", part)))?;
                count += 1;
            }
        }
    }
    Ok(count)
}

/// Counts per-CPU `cpuN` lines in `/proc/stat` content.
///
/// The aggregate `cpu ` line is not counted. CPUs present in `/proc/stat`
/// are the ones currently receiving ticks, i.e. the active set.
pub fn parse_stat_cpu_count(content: &str) -> Result<u32, ParseError> {
    let count = content
        .lines()
        .filter(|line| {
            // The aggregate line is "cpu  ..."; per-CPU lines attach the id
            // directly, as in "cpu0 ...".
            line.strip_prefix("cpu").is_some_and(|rest| {
                let id = rest.split_whitespace().next().unwrap_or("");
                rest.starts_with(|c: char| c.is_ascii_digit())
                    && id.chars().all(|c| c.is_ascii_digit())
            })
        })
        .count();
    if count == 0 {
        return Err(ParseError::new("no cpuN lines in stat"));
    }
    Ok(count as u32)
}

/// Parses `/proc/uptime` content into whole minutes since boot.
///
/// The file holds two floats; only the first (uptime seconds) matters.
pub fn parse_uptime_minutes(content: &str) -> Result<u64, ParseError> {
    let seconds: f64 = content
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::new("empty uptime"))?
        .parse()
        .map_err(|_| ParseError::new("bad uptime value"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ParseError::new("bad uptime value"));
    }
    Ok((seconds / 60.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meminfo() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
";
        let info = parse_meminfo(content).unwrap();
        assert_eq!(info.total_kb, 16384000);
        assert_eq!(info.free_kb, 8192000);
    }

    #[test]
    fn test_parse_meminfo_missing_keys() {
        assert!(parse_meminfo("MemTotal: 100 kB\n").is_err());
        assert!(parse_meminfo("").is_err());
    }

    #[test]
    fn test_parse_cpu_model() {
        let content = "\
processor\t: 0
vendor_id\t: AuthenticAMD
model name\t: AMD Ryzen 7 5800X 8-Core Processor
stepping\t: 0
";
        assert_eq!(
            parse_cpu_model(content).unwrap(),
            "AMD Ryzen 7 5800X 8-Core Processor"
        );
    }

    #[test]
    fn test_parse_cpu_model_missing() {
        assert!(parse_cpu_model("processor: 0\n").is_err());
    }

    #[test]
    fn test_parse_cpu_list() {
        assert_eq!(parse_cpu_list("0-3\n").unwrap(), 4);
        assert_eq!(parse_cpu_list("0\n").unwrap(), 1);
        assert_eq!(parse_cpu_list("0-3,5,7-8\n").unwrap(), 7);
        assert_eq!(parse_cpu_list("\n").unwrap(), 0);
        assert!(parse_cpu_list("3-1\n").is_err());
        assert!(parse_cpu_list("x\n").is_err());
    }

    #[test]
    fn test_parse_stat_cpu_count() {
        let content = "\
cpu  10 20 30 40
cpu0 1 2 3 4
cpu1 1 2 3 4
intr 100
ctxt 200
";
        assert_eq!(parse_stat_cpu_count(content).unwrap(), 2);
        assert!(parse_stat_cpu_count("ctxt 200\n").is_err());
    }

    #[test]
    fn test_parse_uptime_minutes() {
        assert_eq!(parse_uptime_minutes("7200.00 25000.00\n").unwrap(), 120);
        assert_eq!(parse_uptime_minutes("59.99 1.0\n").unwrap(), 0);
        assert!(parse_uptime_minutes("").is_err());
        assert!(parse_uptime_minutes("abc def\n").is_err());
    }
}
