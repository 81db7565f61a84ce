//! Built-in course shipped with the app.

use super::content::{LessonContent, QuizContentBlock};
use super::model::{Course, Lesson, Stage, SubLesson};
use crate::progress::LessonStatus;

const LESSON_POINTS: u32 = 20;

/// The beginner C programming course.
pub fn beginner_c_courses() -> Vec<Course> {
    vec![
        Course::new("course_c_beginner", "C")
            .with_stage(beginner_stage())
            .with_stage(intermediate_stage()),
    ]
}

fn beginner_stage() -> Stage {
    Stage::new("beginner_stage", "Beginner")
        .with_lesson(
            Lesson::new("beginner_c1", "Introduction to C Programming")
                .with_description(
                    "In this lesson, we will cover the basics of C programming, including syntax, structure, and variables.",
                )
                .with_points(LESSON_POINTS)
                .with_status(LessonStatus::Active)
                .with_sub_lesson(
                    SubLesson::new("beginner_c1_sub1", "Overview of C Programming")
                        .with_description(
                            "Introduction to C programming and its key features. Discuss the history of C, its popularity, and where it is used.",
                        )
                        .with_status(LessonStatus::Active),
                )
                .with_sub_lesson(
                    SubLesson::new("beginner_c1_sub2", "Basic Syntax").with_description(
                        "Understanding the structure of a C program, including functions, libraries, and statements.",
                    ),
                )
                .with_sub_lesson(
                    SubLesson::new("beginner_c1_sub3", "Printing Output in C").with_description(
                        "How to print output in C using the `printf` function, including printing strings and variables.",
                    ),
                )
                .with_content(
                    LessonContent::new("beginner_c1_sub1", "Overview of C Programming").text(
                        "C is one of the most popular and widely used programming languages, especially for \
                         system-level programming. Developed in the 1970s by Dennis Ritchie, it is fast, efficient, \
                         and allows direct manipulation of memory.",
                    ),
                )
                .with_content(
                    LessonContent::new("beginner_c1_sub2", "Basic Syntax")
                        .text("All C programs start execution from the `main()` function.")
                        .code(
                            "#include <stdio.h>\nint main() {\n    printf(\"Welcome to C programming!\");\n    return 0;\n}",
                        ),
                )
                .with_content(
                    LessonContent::new("beginner_c1_sub3", "Printing Output in C")
                        .text("In C, we use the `printf()` function to display output.")
                        .code(
                            "#include <stdio.h>\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}",
                        )
                        .quiz(QuizContentBlock {
                            question: "Which format specifier prints an int?".to_string(),
                            options: vec!["%s".to_string(), "%d".to_string(), "%c".to_string()],
                            correct_answer: "%d".to_string(),
                        }),
                ),
        )
        .with_lesson(
            Lesson::new("beginner_c2", "Data Types and Variables")
                .with_description(
                    "In this lesson, we will learn about different data types in C and how to declare and use variables.",
                )
                .with_points(LESSON_POINTS)
                .with_sub_lesson(
                    SubLesson::new("beginner_c2_sub1", "Understanding Data Types").with_description(
                        "Introduction to basic data types like int, char, float, and double.",
                    ),
                )
                .with_sub_lesson(
                    SubLesson::new("beginner_c2_sub2", "Declaring and Using Variables")
                        .with_description("Learn how to declare variables and assign values in C."),
                )
                .with_content(
                    LessonContent::new("beginner_c2_sub1", "Understanding Data Types").text(
                        "`int` stores whole numbers, `char` a single character, `float` and `double` \
                         floating-point numbers.",
                    ),
                )
                .with_content(
                    LessonContent::new("beginner_c2_sub2", "Declaring and Using Variables")
                        .text("To declare a variable, give its type followed by its name.")
                        .code("int age = 25;\nchar grade = 'A';\nprintf(\"Age: %d, Grade: %c\\n\", age, grade);"),
                ),
        )
}

fn intermediate_stage() -> Stage {
    Stage::new("intermediate_stage", "Intermediate").with_lesson(
        Lesson::new("intermediate_c1", "Control Structures in C")
            .with_description(
                "This lesson introduces control structures like if-else statements, loops (for, while), and switches.",
            )
            .with_points(LESSON_POINTS)
            .with_sub_lesson(
                SubLesson::new("intermediate_c1_sub1", "Conditional Statements (if-else)")
                    .with_description("Learn how to use if-else statements for decision-making in programs."),
            )
            .with_sub_lesson(
                SubLesson::new("intermediate_c1_sub2", "Loops (for, while)")
                    .with_description("Learn how to use loops for repeated execution of code."),
            )
            .with_content(
                LessonContent::new("intermediate_c1_sub1", "Conditional Statements (if-else)").code(
                    "if (age >= 18) {\n    printf(\"You are an adult!\\n\");\n} else {\n    printf(\"You are a minor!\\n\");\n}",
                ),
            ),
    )
}
