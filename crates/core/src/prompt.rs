use crate::types::Message;

/// Review instructions placed ahead of the source code.
///
/// Markdown hard line breaks (two trailing spaces) are part of the text.
pub const REVIEW_INSTRUCTIONS: &str = r##"
Please review the provided code and identify any **syntax or logical errors**, suggest **refactoring improvements** to enhance code quality, recommend **performance optimizations**, address any **security vulnerabilities**, and ensure alignment with **best practices**. Additionally, highlight **potential bugs** that could emerge during runtime or in edge cases.

For each point, provide concise feedback, and when relevant, offer **code suggestions** to demonstrate the fix or improvement. Use the prompts provided for each section to structure your responses effectively.

**Note**: Limit your recommendations to 30 per category. If applicable, include line numbers to make the feedback actionable.

---

Response format:

---

**Syntax and logical errors**:  
- Highlight syntax issues, such as missing parentheses or improper indentation.
- Look for logical issues where conditions may never be true, or variables are misused.
- If there is an issue with variable assignment or function calls, correct it with an example.

Example:
```python
# Original
if x = 5:  
    do_something()

# Corrected
if x == 5:  
    do_something()
```

---

**Code refactoring and quality**:  
- Recommend extracting repetitive logic into separate functions to reduce duplication.
- Suggest restructuring code to improve readability, like replacing deep nesting with guard clauses.
- Propose using better data structures or design patterns to make the code more maintainable.

Example:
```python
# Original: Repetitive code in an if-else block
if user.role == 'admin':
    return 'Admin access'
elif user.role == 'editor':
    return 'Editor access'
else:
    return 'Viewer access'

# Refactored: Use a dictionary lookup
roles = {
    'admin': 'Admin access',
    'editor': 'Editor access',
    'viewer': 'Viewer access'
}
return roles.get(user.role, 'Viewer access')
```

---

**Performance optimization**:  
- Look for inefficient loops or expensive calculations that can be optimized.
- Suggest using more efficient algorithms or data structures (e.g., switching from `O(n^2)` to `O(n log n)`).
- Propose caching results of expensive operations if they are used multiple times.

Example:
```python
# Original: Repeated expensive operation inside a loop
for item in items:
    expensive_result = calculate_expensive_operation(item)
    process(expensive_result)

# Optimized: Cache the result outside the loop
expensive_result_cache = calculate_expensive_operation(items)
for item in items:
    process(expensive_result_cache)
```

---

**Security vulnerabilities**:  
- Point out vulnerabilities such as SQL injection, XSS, or hardcoded sensitive data.
- Recommend using safer coding practices, like prepared statements for SQL queries.
- Propose using encryption, secure communication protocols, or proper validation for inputs.

Example:
```python
# Original: SQL query vulnerable to injection
query = f"SELECT * FROM users WHERE username = '{username}'"

# Secure version: Use prepared statements
cursor.execute("SELECT * FROM users WHERE username = %s", (username,))
```

---



**Possible bugs**:  
- Look for off-by-one errors, uncaught exceptions, or issues with unhandled edge cases.
- Recommend adding error handling, boundary checks, or modifying loops to prevent such bugs.
- If the logic could break with certain inputs, suggest a safer implementation.

Example:
```python
# Original: Off-by-one error in loop
for i in range(len(items)):
    print(items[i+1])

# Bug fix: Adjust loop to prevent accessing out-of-range index
for i in range(len(items)-1):
    print(items[i+1])
```

---

**Best practices**:  
- Suggest consistent naming conventions (e.g., camelCase vs snake_case) throughout the code.
- Encourage adding meaningful comments or docstrings, especially in complex functions.
- Recommend writing unit tests or adding error handling where appropriate.

Example:
```python
# Original: Inconsistent naming and no docstrings
def calculateSum():
    return 0

def calculate_total_sum():
    pass

# Best practice: Consistent naming and docstring added
def calculate_sum():

    Function to calculate the sum of values.

    return 0
```

---

**Recommendation Code**:  
- Provide a final compiled section that integrates all the review comments into one **revised code example**.
- Ensure that the combined feedback (syntax fixes, refactoring, performance optimization, and best practices) is implemented in this final code block.
- This section should serve as the final, improved version of the provided code, with all recommendations applied.

Example:
```python
# Final compiled code with all recommendations applied
def calculate_sum_of_users():
    ```
    This function calculates and returns the sum of all active users.
    It also checks for valid user role before calculation.
    ```

    # Mapping of user roles
    roles = {
        'admin': 'Admin access',
        'editor': 'Editor access',
        'viewer': 'Viewer access'
    }

    # Cached expensive operation outside loop
    expensive_result_cache = calculate_expensive_operation(users)

    # Refactored loop for processing users with added error handling
    for user in users:
        try:
            if user.role not in roles:
                raise ValueError(f"Unknown role: {user.role}")
            process(expensive_result_cache)

        except Exception as e:
            print(f"Error processing user {user.id}: {e}")

# Secure SQL query using prepared statements
def get_user_by_username(username):
    cursor.execute("SELECT * FROM users WHERE username = s", (username,))
    return cursor.fetchone()

# Best practice: added docstrings and consistent naming conventions
def update_user_profile(user_id, profile_data):
    ```
    Update user profile information in the database.
    :param user_id: The ID of the user.
    :param profile_data: Dictionary containing user profile updates.
    ```
    # Example logic here
    pass
```

---




"##;

/// Build the review prompt with the source code interpolated.
pub fn build_prompt(code: &str) -> String {
    format!("{REVIEW_INSTRUCTIONS}Code:\n```\n{code}\n```\n\nYour review:")
}

/// Wrap the review prompt for `code` as the single system message of a request.
pub fn build_messages(code: &str) -> Vec<Message> {
    vec![Message::system(build_prompt(code))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_prompt_embeds_code_in_fence() {
        let prompt = build_prompt("fn main() {}");
        assert!(prompt.starts_with("\nPlease review the provided code"));
        assert!(prompt.contains("Code:\n```\nfn main() {}\n```"));
        assert!(prompt.ends_with("Your review:"));
    }

    #[test]
    fn test_prompt_keeps_every_section_and_example() {
        let prompt = build_prompt("x = 1");
        for section in [
            "**Syntax and logical errors**:  \n",
            "**Code refactoring and quality**:  \n",
            "**Performance optimization**:  \n",
            "**Security vulnerabilities**:  \n",
            "**Possible bugs**:  \n",
            "**Best practices**:  \n",
            "**Recommendation Code**:  \n",
        ] {
            assert!(prompt.contains(section), "missing section {section:?}");
        }

        assert!(prompt.contains("# Optimized: Cache the result outside the loop"));
        assert!(prompt.contains("# Bug fix: Adjust loop to prevent accessing out-of-range index"));
        assert!(prompt.contains("# Best practice: Consistent naming and docstring added"));
        assert!(prompt.contains("# Final compiled code with all recommendations applied"));
        assert!(prompt.contains("(e.g., camelCase vs snake_case)"));
        assert!(prompt.contains("roles = {\n    'admin': 'Admin access',"));
        assert!(prompt.contains("---\n\n\n\n\nCode:\n```\nx = 1\n```\n\nYour review:"));
    }

    #[test]
    fn test_prompt_fills_most_of_a_small_window() {
        // The instructions alone take over a thousand tokens with the
        // gpt-4o-mini encoding, leaving roughly 7k for code and reply.
        let count = crate::tokens::num_tokens_from_messages(&build_messages("x = 1"), "gpt-4o-mini")
            .unwrap();
        assert!(count > 1100, "prompt only counted {count} tokens");
        assert!(count < 1400, "prompt counted {count} tokens");
    }

    #[test]
    fn test_placeholder_like_text_is_left_alone() {
        let prompt = build_prompt("let s = \"{code}\";");
        assert!(prompt.contains("let s = \"{code}\";"));
    }

    #[test]
    fn test_single_system_message() {
        let messages = build_messages("print('hi')");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("print('hi')"));
        assert!(messages[0].name.is_none());
    }
}
