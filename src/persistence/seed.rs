//! Default starter project used whenever no stored project exists.

use crate::models::Language;

use super::record::{FileRecord, RecordKind};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>My Playground</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <div class="container">
        <h1 id="title">Welcome to Code Playground!</h1>
        <p>Start coding and see your changes live.</p>
        <button id="btn" class="btn">Click me!</button>
    </div>
    <script src="script.js"></script>
</body>
</html>"#;

const STYLE_CSS: &str = r#"* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
}

.container {
    background: white;
    padding: 2rem;
    border-radius: 12px;
    box-shadow: 0 10px 30px rgba(0, 0, 0, 0.2);
    text-align: center;
    max-width: 500px;
}

h1 {
    color: #333;
    margin-bottom: 1rem;
    font-size: 2rem;
}

p {
    color: #666;
    margin-bottom: 2rem;
    line-height: 1.6;
}

.btn {
    background: linear-gradient(45deg, #667eea, #764ba2);
    color: white;
    border: none;
    padding: 12px 24px;
    border-radius: 8px;
    font-size: 1rem;
    cursor: pointer;
    transition: transform 0.2s, box-shadow 0.2s;
}

.btn:hover {
    transform: translateY(-2px);
    box-shadow: 0 5px 15px rgba(0, 0, 0, 0.2);
}

.btn:active {
    transform: translateY(0);
}"#;

const SCRIPT_JS: &str = r#"// Welcome to the JavaScript playground!
console.log('Code Playground loaded successfully!');

// Get DOM elements
const title = document.getElementById('title');
const button = document.getElementById('btn');

// Add click event listener
button.addEventListener('click', function() {
    const colors = ['#ff6b6b', '#4ecdc4', '#45b7d1', '#96ceb4', '#feca57'];
    const randomColor = colors[Math.floor(Math.random() * colors.length)];

    title.style.color = randomColor;
    title.style.transform = 'scale(1.1)';

    console.log('Button clicked! Title color changed to:', randomColor);

    // Reset transform after animation
    setTimeout(() => {
        title.style.transform = 'scale(1)';
    }, 200);
});"#;

fn seed_file(id: &str, name: &str, content: &str) -> FileRecord {
    FileRecord {
        id: id.to_string(),
        name: name.to_string(),
        kind: RecordKind::File,
        language: Some(Language::from_name(name)),
        content: Some(content.to_string()),
        path: format!("/{name}"),
        parent_id: None,
        children: None,
    }
}

pub fn default_project() -> Vec<FileRecord> {
    vec![
        seed_file("1", "index.html", INDEX_HTML),
        seed_file("2", "style.css", STYLE_CSS),
        seed_file("3", "script.js", SCRIPT_JS),
    ]
}
