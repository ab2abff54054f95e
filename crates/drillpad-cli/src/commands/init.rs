//! The `drillpad init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create drillpad.toml
    if std::path::Path::new("drillpad.toml").exists() {
        println!("drillpad.toml already exists, skipping.");
    } else {
        std::fs::write("drillpad.toml", SAMPLE_CONFIG)?;
        println!("Created drillpad.toml");
    }

    // Create example problem set
    std::fs::create_dir_all("problem-sets")?;
    let example_path = std::path::Path::new("problem-sets/example.toml");
    if example_path.exists() {
        println!("problem-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_PROBLEM_SET)?;
        println!("Created problem-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: drillpad validate --problem-set problem-sets/example.toml");
    println!("  2. Run: drillpad import --problem-set problem-sets/example.toml");
    println!("  3. Run: drillpad submit --user alice --problem 1 --answer C");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# drillpad configuration

data_dir = "./data"
upload_dir = "./uploads"
problem_sets_dir = "./problem-sets"

# Upload size cap in bytes (16 MiB)
max_upload_bytes = 16777216
"#;

const EXAMPLE_PROBLEM_SET: &str = r#"[problem_set]
name = "Science Warmup"
description = "A small starter set to get going"
default_category = "Physics"
default_difficulty = "medium"

[[problems]]
id = 1
title = "Chemical Equilibrium"
description = """
In a reversible reaction at equilibrium, what happens to the forward and
reverse reaction rates?
"""
correct_answer = "C"
difficulty = "easy"
category = "Chemistry"

[[problems.options]]
id = "A"
text = "Forward rate becomes zero"

[[problems.options]]
id = "B"
text = "Reverse rate becomes zero"

[[problems.options]]
id = "C"
text = "Both rates become equal"

[[problems.options]]
id = "D"
text = "Rates constantly fluctuate"

[[problems]]
id = 2
title = "Kinematics: Projectile Motion"
description = """
What is the horizontal component of velocity in projectile motion under
ideal conditions?
"""
correct_answer = "D"

[[problems.options]]
id = "A"
text = "Constantly increasing"

[[problems.options]]
id = "B"
text = "Constantly decreasing"

[[problems.options]]
id = "C"
text = "Zero"

[[problems.options]]
id = "D"
text = "Constant"

[[problems]]
id = 3
title = "Vectors: 3D Motion"
description = """
Which components of a vector are needed to fully describe motion in three
dimensions?
"""
correct_answer = "C"

[[problems.options]]
id = "A"
text = "X and Y components only"

[[problems.options]]
id = "B"
text = "Y and Z components only"

[[problems.options]]
id = "C"
text = "X, Y, and Z components"

[[problems.options]]
id = "D"
text = "Magnitude only"
"#;
