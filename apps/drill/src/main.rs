fn main() -> anyhow::Result<()> {
    review_drill::run()
}
