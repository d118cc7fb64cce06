//! Skeleton placeholders shown while data loads.

const SHADE: char = '░';

/// One placeholder bar of `width` cells
pub fn bar(width: usize) -> String {
    SHADE.to_string().repeat(width)
}

/// A block of placeholder bars, one per requested width
pub fn block(widths: &[usize]) -> Vec<String> {
    widths.iter().map(|w| bar(*w)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block() {
        assert_eq!(block(&[3, 1]), vec!["░░░", "░"]);
        assert_eq!(bar(0), "");
    }
}
